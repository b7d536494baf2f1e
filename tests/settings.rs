mod tests {
    use embassy_time::Duration;
    use myrtio_wordclock::category::Category;
    use myrtio_wordclock::settings::{SettingsEffects, TrySendError, apply_intent};
    use myrtio_wordclock::{
        EffectId, EngineConfig, Language, LightSource, Lights, Rgb, SecondsMode, SettingsChannel,
        SettingsIntent, SettingsProcessor,
    };

    fn apply(
        intent: SettingsIntent,
        config: &mut EngineConfig,
        lights: &mut Lights,
    ) -> SettingsEffects {
        let mut effects = SettingsEffects::default();
        apply_intent(intent, config, lights, &mut effects);
        effects
    }

    #[test]
    fn test_full_queue_returns_intent() {
        let channel = SettingsChannel::<2>::new();
        let sender = channel.sender();
        assert!(sender.try_send(SettingsIntent::Power(false)).is_ok());
        assert!(sender.try_send(SettingsIntent::EffectSpeed(80.0)).is_ok());
        assert_eq!(
            sender.try_send(SettingsIntent::FactoryReset),
            Err(TrySendError(SettingsIntent::FactoryReset))
        );

        let receiver = channel.receiver();
        assert_eq!(receiver.try_receive(), Some(SettingsIntent::Power(false)));
        assert!(sender.try_send(SettingsIntent::FactoryReset).is_ok());
    }

    #[test]
    fn test_processor_drains_in_order() {
        let channel = SettingsChannel::<8>::new();
        let sender = channel.sender();
        sender.try_send(SettingsIntent::RainbowSpread(40.0)).unwrap();
        sender.try_send(SettingsIntent::RainbowSpread(60.0)).unwrap();
        sender.try_send(SettingsIntent::Power(false)).unwrap();

        let mut processor = SettingsProcessor::new(channel.receiver());
        let mut config = EngineConfig::default();
        let mut lights = Lights::default();
        let effects = processor.process_pending(&mut config, &mut lights);

        assert!(effects.changed);
        assert_eq!(effects.power, Some(false));
        assert_eq!(config.rainbow_spread, 60.0);
        assert_eq!(channel.receiver().try_receive(), None);

        let effects = processor.process_pending(&mut config, &mut lights);
        assert_eq!(effects, SettingsEffects::default());
    }

    #[test]
    fn test_percent_values_are_clamped() {
        let mut config = EngineConfig::default();
        let mut lights = Lights::default();
        apply(SettingsIntent::RainbowSpread(150.0), &mut config, &mut lights);
        apply(SettingsIntent::EffectSpeed(-5.0), &mut config, &mut lights);
        apply(SettingsIntent::WordsEffectBrightness(f32::NAN), &mut config, &mut lights);
        assert_eq!(config.rainbow_spread, 100.0);
        assert_eq!(config.effect_speed, 0.0);
        assert_eq!(config.words_effect_brightness, 0.0);
    }

    #[test]
    fn test_durations_from_seconds() {
        let mut config = EngineConfig::default();
        let mut lights = Lights::default();
        apply(SettingsIntent::WordsFadeIn(0.5), &mut config, &mut lights);
        apply(SettingsIntent::TypingDelay(-1.0), &mut config, &mut lights);
        apply(SettingsIntent::SecondsFadeOut(2.0), &mut config, &mut lights);
        assert_eq!(config.timings.words_fade_in, Duration::from_millis(500));
        assert_eq!(config.timings.typing_delay, Duration::from_millis(0));
        assert_eq!(config.timings.seconds_fade_out, Duration::from_secs(2));
    }

    #[test]
    fn test_language_change_is_reported_once() {
        let mut config = EngineConfig::default();
        let mut lights = Lights::default();
        let effects = apply(
            SettingsIntent::Language(Language::EnglishUk),
            &mut config,
            &mut lights,
        );
        assert!(effects.language_changed);
        assert!(effects.needs_recompute());

        let effects = apply(
            SettingsIntent::Language(Language::EnglishUk),
            &mut config,
            &mut lights,
        );
        assert!(effects.changed);
        assert!(!effects.language_changed);
        assert!(!effects.needs_recompute());
    }

    #[test]
    fn test_seconds_inputs_request_recompute() {
        let mut config = EngineConfig::default();
        let mut lights = Lights::default();
        let effects = apply(
            SettingsIntent::SecondsMode(SecondsMode::Passed),
            &mut config,
            &mut lights,
        );
        assert!(effects.seconds_changed);

        let effects = apply(
            SettingsIntent::Light(Category::Seconds, None),
            &mut config,
            &mut lights,
        );
        assert!(effects.seconds_changed);
        assert!(!lights.is_on(Category::Seconds));

        let red = LightSource::new(Rgb::new(255, 0, 0), 1.0);
        let effects = apply(
            SettingsIntent::Light(Category::Hours, Some(red)),
            &mut config,
            &mut lights,
        );
        assert!(!effects.seconds_changed);
    }

    #[test]
    fn test_effect_selection() {
        let mut config = EngineConfig::default();
        let mut lights = Lights::default();
        let effects = apply(
            SettingsIntent::SecondsEffect(EffectId::Breathe),
            &mut config,
            &mut lights,
        );
        assert!(effects.effects_changed);
        assert_eq!(config.seconds_effect, EffectId::Breathe);
        assert_eq!(config.words_effect, EffectId::Rainbow);
    }

    #[test]
    fn test_factory_reset() {
        let mut config = EngineConfig::default();
        let mut lights = Lights::default();
        apply(SettingsIntent::Language(Language::EnglishUk), &mut config, &mut lights);
        apply(SettingsIntent::WordsEffect(EffectId::Pulse), &mut config, &mut lights);
        apply(SettingsIntent::Light(Category::Background, None), &mut config, &mut lights);

        let effects = apply(SettingsIntent::FactoryReset, &mut config, &mut lights);
        assert_eq!(config, EngineConfig::default());
        assert_eq!(lights, Lights::default());
        assert!(effects.factory_reset);
        assert!(effects.language_changed);
        assert!(effects.effects_changed);
        assert_eq!(effects.power, Some(true));
    }
}
