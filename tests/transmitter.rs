mod tests {
    use std::net::SocketAddr;

    use embassy_time::{Duration, Instant};
    use myrtio_stage_light::artnet::ArtDmxHeader;
    use myrtio_stage_light::config::LightConfig;
    use myrtio_stage_light::error::Error;
    use myrtio_stage_light::frame_scheduler::FrameScheduler;
    use myrtio_stage_light::transmitter::{Route, TransmitState, Transmitter};
    use myrtio_stage_light::universe::UniverseStore;
    use myrtio_stage_light::{PacketSink, Periodic};

    #[derive(Default)]
    struct RecordingSink {
        packets: Vec<(SocketAddr, Vec<u8>)>,
        failing: bool,
    }

    impl PacketSink for RecordingSink {
        type Error = &'static str;

        fn send(&mut self, endpoint: SocketAddr, packet: &[u8]) -> Result<(), Self::Error> {
            if self.failing {
                return Err("network unreachable");
            }
            self.packets.push((endpoint, packet.to_vec()));
            Ok(())
        }
    }

    fn default_store() -> UniverseStore {
        let store = UniverseStore::new();
        for universe in 0..4 {
            store.register(universe).unwrap();
        }
        store
    }

    fn header(packet: &[u8]) -> ArtDmxHeader {
        ArtDmxHeader::parse(packet).unwrap()
    }

    #[test]
    fn test_round_robin_routing() {
        let store = default_store();
        let mut transmitter =
            Transmitter::from_config(RecordingSink::default(), &store, &LightConfig::default())
                .unwrap();

        assert_eq!(transmitter.next_universe(), 0);
        for expected in [0, 1, 2, 3, 0] {
            assert_eq!(transmitter.send_next(), Ok(expected));
        }
        assert_eq!(transmitter.state(), TransmitState::Idle);

        let sent = &transmitter.sink().packets;
        let universes: Vec<u16> = sent.iter().map(|(_, p)| header(p).universe).collect();
        assert_eq!(universes, [0, 1, 2, 3, 0]);

        let near: SocketAddr = "192.168.1.200:6454".parse().unwrap();
        let far: SocketAddr = "192.168.1.201:6454".parse().unwrap();
        let endpoints: Vec<SocketAddr> = sent.iter().map(|(e, _)| *e).collect();
        assert_eq!(endpoints, [near, near, far, far, near]);
        assert!(sent.iter().all(|(_, p)| p.len() == 530));
    }

    #[test]
    fn test_packets_carry_store_contents() {
        let store = default_store();
        store.write_fixture(2, 8, [1, 2, 3, 4]).unwrap();
        let route = Route {
            universe: 2,
            endpoint: "10.0.0.1:6454".parse().unwrap(),
        };
        let mut transmitter =
            Transmitter::new(RecordingSink::default(), &store, &[route]).unwrap();
        transmitter.send_next().unwrap();

        let (_, packet) = &transmitter.sink().packets[0];
        assert_eq!(packet[18 + 8..18 + 12], [1, 2, 3, 4]);
        assert_eq!(header(packet).sequence, 0);
    }

    #[test]
    fn test_failed_send_moves_on() {
        let store = default_store();
        let sink = RecordingSink {
            failing: true,
            ..Default::default()
        };
        let mut transmitter =
            Transmitter::from_config(sink, &store, &LightConfig::default()).unwrap();

        assert_eq!(transmitter.send_next(), Err(Error::Transport { universe: 0 }));
        assert_eq!(transmitter.next_universe(), 1);
        transmitter.tick(Instant::from_millis(0));
        assert_eq!(transmitter.next_universe(), 2);
        assert_eq!(transmitter.state(), TransmitState::Idle);
    }

    #[test]
    fn test_unregistered_universe() {
        let store = UniverseStore::new();
        let route = Route {
            universe: 9,
            endpoint: "10.0.0.1:6454".parse().unwrap(),
        };
        let mut transmitter =
            Transmitter::new(RecordingSink::default(), &store, &[route]).unwrap();
        assert!(matches!(transmitter.send_next(), Err(Error::InvalidInput(_))));
        assert!(transmitter.sink().packets.is_empty());
    }

    #[test]
    fn test_route_validation() {
        let store = UniverseStore::new();
        assert!(Transmitter::new(RecordingSink::default(), &store, &[]).is_err());

        let mut config = LightConfig::default();
        config.routes[0].address = "not an address".into();
        assert!(Transmitter::from_config(RecordingSink::default(), &store, &config).is_err());
    }

    #[test]
    fn test_sequence_wraps_to_one() {
        let store = default_store();
        let route = Route {
            universe: 1,
            endpoint: "10.0.0.1:6454".parse().unwrap(),
        };
        let mut transmitter = Transmitter::new(RecordingSink::default(), &store, &[route])
            .unwrap()
            .with_sequencing(true);

        for _ in 0..256 {
            transmitter.send_next().unwrap();
        }
        let sequences: Vec<u8> = transmitter
            .sink()
            .packets
            .iter()
            .map(|(_, p)| header(p).sequence)
            .collect();
        assert_eq!(sequences[0], 1);
        assert_eq!(sequences[254], 255);
        assert_eq!(sequences[255], 1);
    }

    #[test]
    fn test_sequences_are_per_route() {
        let store = default_store();
        let mut config = LightConfig::default();
        config.sequencing = true;
        config.physical_port = 2;
        let mut transmitter =
            Transmitter::from_config(RecordingSink::default(), &store, &config).unwrap();
        for _ in 0..8 {
            transmitter.send_next().unwrap();
        }
        let headers: Vec<ArtDmxHeader> = transmitter
            .sink()
            .packets
            .iter()
            .map(|(_, p)| header(p))
            .collect();
        assert!(headers[..4].iter().all(|h| h.sequence == 1));
        assert!(headers[4..].iter().all(|h| h.sequence == 2));
        assert!(headers.iter().all(|h| h.physical == 2));
    }

    #[test]
    fn test_scheduled_transmission() {
        let store = default_store();
        let transmitter =
            Transmitter::from_config(RecordingSink::default(), &store, &LightConfig::default())
                .unwrap();
        let mut scheduler = FrameScheduler::new(transmitter, Duration::from_millis(25));

        let mut now = Instant::from_millis(0);
        for _ in 0..4 {
            let result = scheduler.tick(now);
            now = result.next_deadline;
        }
        assert_eq!(now, Instant::from_millis(100));
        assert_eq!(scheduler.task().sink().packets.len(), 4);
    }
}
