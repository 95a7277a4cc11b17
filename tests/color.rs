mod tests {
    use myrtio_stage_light::color::{
        Rgb, Rgbw, WhitePolicy, distance_sq, hsl_to_rgb, rgb_to_hsl, rgb_to_rgbw, rotate_hue,
    };
    use myrtio_stage_light::filter::{
        ColorTransformer, ColorTransformerConfig, SaturationPolicy, apply_brightness,
        apply_saturation,
    };

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
    const ORANGE: Rgb = Rgb {
        r: 200,
        g: 100,
        b: 50,
    };

    #[test]
    fn test_rgb_to_rgbw() {
        assert_eq!(
            rgb_to_rgbw(ORANGE, WhitePolicy::Subtractive),
            Rgbw::new(150, 50, 0, 50)
        );
        assert_eq!(
            rgb_to_rgbw(ORANGE, WhitePolicy::Additive),
            Rgbw::new(200, 100, 50, 50)
        );
        assert_eq!(
            rgb_to_rgbw(WHITE, WhitePolicy::Subtractive),
            Rgbw::new(0, 0, 0, 255)
        );
        assert_eq!(
            rgb_to_rgbw(RED, WhitePolicy::Subtractive),
            Rgbw::new(255, 0, 0, 0)
        );
    }

    #[test]
    fn test_brightness_scales_all_channels() {
        let color = Rgbw::new(200, 100, 50, 10);
        assert_eq!(apply_brightness(color, 100.0, 1.0), color);
        assert_eq!(apply_brightness(color, 50.0, 1.0), Rgbw::new(100, 50, 25, 5));
        assert_eq!(apply_brightness(color, 0.0, 1.0), Rgbw::default());
    }

    #[test]
    fn test_brightness_saturates() {
        let color = Rgbw::new(200, 100, 50, 10);
        assert_eq!(apply_brightness(color, 100.0, 2.0), Rgbw::new(255, 200, 100, 20));
        assert_eq!(apply_brightness(color, f32::NAN, 1.0), Rgbw::default());
    }

    #[test]
    fn test_hsl_round_trip() {
        for color in [RED, WHITE, ORANGE, Rgb::new(10, 20, 30), Rgb::new(12, 200, 180)] {
            assert_eq!(hsl_to_rgb(rgb_to_hsl(color)), color);
        }
    }

    #[test]
    fn test_saturation_identity_at_factor_one() {
        let color = Rgbw::new(200, 100, 50, 7);
        assert_eq!(apply_saturation(color, 1.0, SaturationPolicy::Hsl), color);
        assert_eq!(apply_saturation(color, 1.0, SaturationPolicy::Mean), color);
    }

    #[test]
    fn test_saturation_zero_is_gray() {
        let color = Rgbw::new(255, 0, 0, 9);
        assert_eq!(
            apply_saturation(color, 0.0, SaturationPolicy::Hsl),
            Rgbw::new(128, 128, 128, 9)
        );
        assert_eq!(
            apply_saturation(color, 0.0, SaturationPolicy::Mean),
            Rgbw::new(85, 85, 85, 9)
        );
    }

    #[test]
    fn test_saturation_boost() {
        let color = Rgbw::new(200, 100, 50, 0);
        assert_eq!(
            apply_saturation(color, 2.0, SaturationPolicy::Hsl),
            Rgbw::new(250, 83, 0, 0)
        );
        let boosted = apply_saturation(color, 3.0, SaturationPolicy::Mean);
        assert_eq!(boosted.r, 255);
        assert_eq!(boosted.b, 0);
    }

    #[test]
    fn test_transformer_order() {
        let transformer = ColorTransformer::new(&ColorTransformerConfig {
            white: WhitePolicy::Subtractive,
            saturation: SaturationPolicy::Hsl,
            saturation_factor: 1.0,
            brightness_factor: 1.0,
        });
        assert_eq!(transformer.transform(WHITE, 100.0), Rgbw::new(0, 0, 0, 255));
        assert_eq!(transformer.transform(WHITE, 40.0), Rgbw::new(0, 0, 0, 102));
        assert_eq!(transformer.transform(ORANGE, 50.0), Rgbw::new(75, 25, 0, 25));
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance_sq(RED, RED), 0);
        assert_eq!(distance_sq(Rgb::new(0, 0, 0), WHITE), 3 * 255 * 255);
    }

    #[test]
    fn test_rotate_hue() {
        assert_eq!(rotate_hue(ORANGE, 0), ORANGE);
        assert_eq!(rotate_hue(WHITE, 100), WHITE);
        assert_ne!(rotate_hue(RED, 85), RED);
    }
}
