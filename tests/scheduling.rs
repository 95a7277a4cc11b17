mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_stage_light::Periodic;
    use myrtio_stage_light::channel::{Channel, TryReceiveError, TrySendError};
    use myrtio_stage_light::frame_scheduler::FrameScheduler;

    #[derive(Default)]
    struct Counter {
        ticks: Vec<Instant>,
    }

    impl Periodic for Counter {
        fn tick(&mut self, now: Instant) {
            self.ticks.push(now);
        }
    }

    #[test]
    fn test_scheduler_keeps_cadence() {
        let mut scheduler = FrameScheduler::new(Counter::default(), Duration::from_millis(25));

        let first = scheduler.tick(Instant::from_millis(0));
        assert_eq!(first.next_deadline, Instant::from_millis(25));
        assert_eq!(first.sleep_duration, Duration::from_millis(25));

        // A little late: the deadline stays on the grid
        let second = scheduler.tick(Instant::from_millis(30));
        assert_eq!(second.next_deadline, Instant::from_millis(50));
        assert_eq!(second.sleep_duration, Duration::from_millis(20));

        assert_eq!(scheduler.task().ticks.len(), 2);
    }

    #[test]
    fn test_scheduler_resets_when_far_behind() {
        let mut scheduler = FrameScheduler::new(Counter::default(), Duration::from_millis(25));
        scheduler.tick(Instant::from_millis(0));

        let late = scheduler.tick(Instant::from_millis(200));
        assert_eq!(late.next_deadline, Instant::from_millis(225));
        assert_eq!(late.sleep_duration, Duration::from_millis(25));
    }

    #[test]
    fn test_scheduler_period_change() {
        let mut scheduler = FrameScheduler::new(Counter::default(), Duration::from_millis(25));
        scheduler.set_frame_duration(Duration::from_millis(10));
        assert_eq!(scheduler.frame_duration(), Duration::from_millis(10));
        let result = scheduler.tick(Instant::from_millis(0));
        assert_eq!(result.next_deadline, Instant::from_millis(10));
        scheduler.task_mut().ticks.clear();
        assert!(scheduler.task().ticks.is_empty());
    }

    #[test]
    fn test_channel_is_fifo() {
        let channel: Channel<u32, 2> = Channel::new();
        let sender = channel.sender();
        let receiver = channel.receiver();

        assert_eq!(receiver.try_receive(), Err(TryReceiveError));
        sender.try_send(1).unwrap();
        sender.try_send(2).unwrap();
        assert_eq!(sender.try_send(3), Err(TrySendError(3)));
        assert_eq!(channel.len(), 2);

        assert_eq!(receiver.try_receive(), Ok(1));
        assert_eq!(receiver.try_receive(), Ok(2));
        assert!(channel.is_empty());
    }

    #[test]
    fn test_channel_send_evicting_drops_oldest() {
        let channel: Channel<u32, 2> = Channel::new();
        let sender = channel.sender();
        assert_eq!(sender.send_evicting(1, |_| true), Ok(None));
        assert_eq!(sender.send_evicting(2, |_| true), Ok(None));
        assert_eq!(sender.send_evicting(3, |_| true), Ok(Some(1)));

        let receiver = channel.receiver();
        assert_eq!(receiver.try_receive(), Ok(2));
        assert_eq!(receiver.try_receive(), Ok(3));
    }

    #[test]
    fn test_channel_send_evicting_keeps_protected() {
        // Odd values stand in for config updates, even ones for samples
        let channel: Channel<u32, 3> = Channel::new();
        let sender = channel.sender();
        sender.try_send(1).unwrap();
        sender.try_send(2).unwrap();
        sender.try_send(3).unwrap();

        let even = |value: &u32| value % 2 == 0;
        assert_eq!(sender.send_evicting(4, even), Ok(Some(2)));
        assert_eq!(sender.send_evicting(5, even), Ok(Some(4)));
        assert_eq!(sender.send_evicting(6, even), Err(TrySendError(6)));

        let receiver = channel.receiver();
        assert_eq!(receiver.try_receive(), Ok(1));
        assert_eq!(receiver.try_receive(), Ok(3));
        assert_eq!(receiver.try_receive(), Ok(5));
        assert!(channel.is_empty());
    }
}
