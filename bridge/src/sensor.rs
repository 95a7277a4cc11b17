//! Line-oriented sensor feed and operator commands
//!
//! Every stdin line is either an intensity sample (`{"d": [...]}`) or a
//! selector command starting with `:`.

use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;

use log::{debug, info, warn};
use myrtio_stage_light::{
    IntensitySample, IntentSender, LightConfig, ParameterSelector, PipelineIntent,
};

/// Operator command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    Toggle,
    Next,
    Previous,
    Increase,
    Decrease,
    Save,
}

impl Command {
    pub(crate) fn parse(input: &str) -> Option<Self> {
        match input {
            "toggle" => Some(Self::Toggle),
            "next" => Some(Self::Next),
            "prev" => Some(Self::Previous),
            "+" => Some(Self::Increase),
            "-" => Some(Self::Decrease),
            "save" => Some(Self::Save),
            _ => None,
        }
    }
}

/// Feeds samples and config updates into the render loop
pub(crate) struct SensorFeed<const N: usize> {
    intents: IntentSender<'static, N>,
    selector: ParameterSelector,
    config: LightConfig,
    config_path: Option<PathBuf>,
}

impl<const N: usize> SensorFeed<N> {
    pub(crate) fn new(
        intents: IntentSender<'static, N>,
        config: LightConfig,
        config_path: Option<PathBuf>,
    ) -> Self {
        Self {
            intents,
            selector: ParameterSelector::new(),
            config,
            config_path,
        }
    }

    /// Read stdin until it closes
    pub(crate) fn run(mut self) -> io::Result<()> {
        for line in io::stdin().lock().lines() {
            self.handle_line(line?.trim());
        }
        info!("sensor feed closed");
        Ok(())
    }

    fn handle_line(&mut self, line: &str) {
        if line.is_empty() {
            return;
        }
        if let Some(input) = line.strip_prefix(':') {
            match Command::parse(input.trim()) {
                Some(command) => self.handle_command(command),
                None => warn!("unknown command `{input}`"),
            }
            return;
        }
        match IntensitySample::from_json(line.as_bytes()) {
            Ok(sample) => {
                let sent = self
                    .intents
                    .send_evicting(PipelineIntent::Sample(sample), |queued| {
                        matches!(queued, PipelineIntent::Sample(_))
                    });
                match sent {
                    Ok(None) => {}
                    Ok(Some(_)) => debug!("render loop is behind, dropped the oldest sample"),
                    Err(_) => warn!("intent queue is full of config updates, sample dropped"),
                }
            }
            Err(err) => warn!("{err}"),
        }
    }

    fn handle_command(&mut self, command: Command) {
        let updated = match command {
            Command::Toggle => {
                self.selector.toggle();
                self.announce();
                None
            }
            Command::Next => {
                self.selector.next();
                self.announce();
                None
            }
            Command::Previous => {
                self.selector.previous();
                self.announce();
                None
            }
            Command::Increase => self.selector.increase(&self.config),
            Command::Decrease => self.selector.decrease(&self.config),
            Command::Save => {
                self.save();
                None
            }
        };

        if let Some(config) = updated {
            if let Err(err) = config.validate() {
                warn!("{err}, keeping the current value");
                return;
            }
            self.config = config.clone();
            self.announce();
            if self
                .intents
                .try_send(PipelineIntent::UpdateConfig(Box::new(config)))
                .is_err()
            {
                warn!("intent queue is full, config update dropped");
            }
        }
    }

    fn announce(&self) {
        if self.selector.is_visible() {
            let parameter = self.selector.selected();
            info!("{} = {}", parameter.as_str(), parameter.value(&self.config));
        } else {
            info!("selector hidden");
        }
    }

    fn save(&self) {
        let Some(path) = &self.config_path else {
            warn!("no config path given, nothing saved");
            return;
        };
        let written = self
            .config
            .to_json()
            .map_err(io::Error::other)
            .and_then(|json| fs::write(path, json));
        match written {
            Ok(()) => info!("config saved to {}", path.display()),
            Err(err) => warn!("cannot save config to {}: {err}", path.display()),
        }
    }
}
