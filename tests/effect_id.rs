mod tests {
    use myrtio_wordclock::EffectId;

    #[test]
    fn test_effect_id_parse_color_cycle() {
        assert_eq!(
            EffectId::parse_from_str("color_cycle"),
            Some(EffectId::ColorCycle)
        );
    }

    #[test]
    fn test_effect_id_from_raw_none() {
        // "none" keeps ID 0 so a zeroed settings record means no effect.
        assert_eq!(EffectId::from_raw(0), Some(EffectId::None));
    }

    #[test]
    fn test_effect_id_from_raw_breathe() {
        assert_eq!(EffectId::from_raw(3), Some(EffectId::Breathe));
    }

    #[test]
    fn test_effect_id_from_raw_out_of_range() {
        assert_eq!(EffectId::from_raw(5), None);
        assert_eq!(EffectId::from_raw(u8::MAX), None);
    }

    #[test]
    fn test_effect_id_names_round_trip() {
        for raw in 0..5 {
            let id = EffectId::from_raw(raw).unwrap();
            assert_eq!(id as u8, raw);
            assert_eq!(EffectId::parse_from_str(id.as_str()), Some(id));
        }
    }

    #[test]
    fn test_effect_id_parse_unknown() {
        assert_eq!(EffectId::parse_from_str("aurora"), None);
        assert_eq!(EffectId::parse_from_str("Rainbow"), None);
    }

    #[test]
    fn test_effect_id_as_str_pulse() {
        assert_eq!(EffectId::Pulse.as_str(), "pulse");
    }

    #[test]
    fn test_effect_id_default_is_rainbow() {
        assert_eq!(EffectId::default(), EffectId::Rainbow);
    }

    #[test]
    fn test_effect_id_to_slot() {
        for raw in 0..5 {
            let id = EffectId::from_raw(raw).unwrap();
            assert_eq!(id.to_slot().id(), id);
        }
        assert!(!EffectId::None.to_slot().is_animated());
        assert!(EffectId::Rainbow.to_slot().is_animated());
        assert!(EffectId::Breathe.to_slot().is_animated());
    }
}
