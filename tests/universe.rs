mod tests {
    use myrtio_stage_light::color::Rgbw;
    use myrtio_stage_light::config::{LightConfig, UniverseRoles};
    use myrtio_stage_light::error::Error;
    use myrtio_stage_light::packer::{FixtureAddress, UniverseLayout, UniversePacker};
    use myrtio_stage_light::universe::{UniverseFrame, UniverseStore};

    fn default_layout() -> UniverseLayout {
        UniverseLayout::from(&LightConfig::default())
    }

    fn address(universe: u16, offset: usize) -> FixtureAddress {
        FixtureAddress { universe, offset }
    }

    #[test]
    fn test_default_layout_addresses() {
        let layout = default_layout();
        assert_eq!(layout.addresses(0).unwrap(), (address(2, 0), address(3, 412)));
        assert_eq!(layout.addresses(103).unwrap(), (address(2, 412), address(3, 0)));
        assert_eq!(layout.addresses(104).unwrap(), (address(0, 0), address(1, 460)));
        assert_eq!(layout.addresses(219).unwrap(), (address(0, 460), address(1, 0)));
        assert!(layout.addresses(220).is_err());
    }

    #[test]
    fn test_layout_out_of_range() {
        let layout = UniverseLayout {
            resolution: 300,
            midpoint: 150,
            roles: UniverseRoles::default(),
        };
        assert_eq!(
            layout.check(),
            Err(Error::AddressOutOfRange {
                universe: 3,
                offset: 596
            })
        );
        assert!(UniversePacker::new(layout).is_err());

        let layout = UniverseLayout {
            resolution: 10,
            midpoint: 11,
            roles: UniverseRoles::default(),
        };
        assert!(matches!(layout.check(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_packer_writes_fixture_pairs() {
        let store = UniverseStore::new();
        let mut packer = UniversePacker::new(default_layout()).unwrap();
        packer.register(&store).unwrap();
        assert_eq!(store.universes().as_slice(), &[2, 0, 3, 1]);

        let bottom = Rgbw::new(1, 2, 3, 4);
        let top = Rgbw::new(5, 6, 7, 8);
        assert_eq!(packer.pack(&store, 0, bottom, top), Ok(true));
        assert_eq!(store.snapshot(2).unwrap()[0..4], [1, 2, 3, 4]);
        assert_eq!(store.snapshot(3).unwrap()[412..416], [5, 6, 7, 8]);

        assert_eq!(packer.pack(&store, 219, top, bottom), Ok(true));
        assert_eq!(store.snapshot(0).unwrap()[460..464], [5, 6, 7, 8]);
        assert_eq!(store.snapshot(1).unwrap()[0..4], [1, 2, 3, 4]);
    }

    #[test]
    fn test_packer_skips_unchanged() {
        let store = UniverseStore::new();
        let mut packer = UniversePacker::new(default_layout()).unwrap();
        packer.register(&store).unwrap();

        let color = Rgbw::new(9, 9, 9, 9);
        assert_eq!(packer.pack(&store, 5, color, color), Ok(true));
        assert_eq!(packer.pack(&store, 5, color, color), Ok(false));
        assert_eq!(packer.pack(&store, 5, color, Rgbw::default()), Ok(true));

        packer.invalidate();
        assert_eq!(packer.pack(&store, 5, color, Rgbw::default()), Ok(true));
    }

    #[test]
    fn test_store_rejects_bad_writes() {
        let store = UniverseStore::new();
        store.register(7).unwrap();
        store.register(7).unwrap();
        assert_eq!(store.universes().len(), 1);

        assert_eq!(
            store.write_fixture(7, 509, [1; 4]),
            Err(Error::AddressOutOfRange {
                universe: 7,
                offset: 509
            })
        );
        assert!(matches!(
            store.write_fixture(8, 0, [1; 4]),
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(store.write_fixture(7, 508, [1; 4]), Ok(()));
        assert_eq!(store.snapshot(7).unwrap()[508..], [1, 1, 1, 1]);
        assert_eq!(store.snapshot(8), None);
    }

    #[test]
    fn test_store_capacity() {
        let store = UniverseStore::new();
        for universe in 0..8 {
            store.register(universe).unwrap();
        }
        assert!(store.register(8).is_err());
    }

    #[test]
    fn test_frame_exchange() {
        let compute = UniverseStore::new();
        compute.register(1).unwrap();
        compute.write_fixture(1, 4, [10, 20, 30, 40]).unwrap();

        let frame = UniverseFrame::capture(&compute, 1).unwrap();
        let json = frame.to_json().unwrap();

        let transmit = UniverseStore::new();
        transmit.register(1).unwrap();
        transmit
            .apply_frame(&UniverseFrame::from_json(&json).unwrap())
            .unwrap();
        assert_eq!(transmit.snapshot(1), compute.snapshot(1));
    }

    #[test]
    fn test_frame_prefix_and_limits() {
        let store = UniverseStore::new();
        store.register(0).unwrap();
        store.write_fixture(0, 0, [9; 4]).unwrap();

        let frame = UniverseFrame {
            universe: 0,
            channels: vec![1, 2],
        };
        store.apply_frame(&frame).unwrap();
        assert_eq!(store.snapshot(0).unwrap()[0..4], [1, 2, 9, 9]);

        let oversized = UniverseFrame {
            universe: 0,
            channels: vec![0; 513],
        };
        assert!(store.apply_frame(&oversized).is_err());

        let unknown = UniverseFrame {
            universe: 5,
            channels: vec![0; 4],
        };
        assert!(store.apply_frame(&unknown).is_err());
        assert!(UniverseFrame::from_json(b"{\"universe\": 1}").is_err());
    }
}
