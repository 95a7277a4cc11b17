mod tests {
    use myrtio_stage_light::artnet::{ArtDmxHeader, HEADER_LEN, PACKET_LEN, encode_art_dmx};
    use myrtio_stage_light::universe::UNIVERSE_SIZE;

    #[test]
    fn test_packet_layout() {
        let mut channels = [0u8; UNIVERSE_SIZE];
        channels[0] = 0xAA;
        channels[511] = 0x55;
        let packet = encode_art_dmx(7, 1, 0x1234, &channels);

        assert_eq!(packet.len(), 530);
        assert_eq!(PACKET_LEN, 530);
        assert_eq!(&packet[0..8], b"Art-Net\0");
        assert_eq!(packet[8..10], [0x00, 0x50]);
        assert_eq!(packet[10..12], [0x00, 14]);
        assert_eq!(packet[12], 7);
        assert_eq!(packet[13], 1);
        assert_eq!(packet[14..16], [0x34, 0x12]);
        assert_eq!(packet[16..18], [0x02, 0x00]);
        assert_eq!(packet[HEADER_LEN], 0xAA);
        assert_eq!(packet[529], 0x55);
    }

    #[test]
    fn test_header_parse() {
        let channels = [0u8; UNIVERSE_SIZE];
        for universe in 0..=u16::MAX {
            let header = ArtDmxHeader::parse(&encode_art_dmx(0, 0, universe, &channels)).unwrap();
            assert_eq!(
                header,
                ArtDmxHeader {
                    sequence: 0,
                    physical: 0,
                    universe,
                    length: 512,
                }
            );
        }
    }

    #[test]
    fn test_header_rejects_garbage() {
        let channels = [0u8; UNIVERSE_SIZE];
        let packet = encode_art_dmx(0, 0, 1, &channels);

        assert!(ArtDmxHeader::parse(&packet[..10]).is_err());
        assert!(ArtDmxHeader::parse(&packet[..100]).is_err());

        let mut wrong_id = packet;
        wrong_id[0] = b'X';
        assert!(ArtDmxHeader::parse(&wrong_id).is_err());

        let mut wrong_opcode = packet;
        wrong_opcode[9] = 0x20;
        assert!(ArtDmxHeader::parse(&wrong_opcode).is_err());
    }
}
