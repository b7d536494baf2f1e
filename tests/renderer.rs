mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_wordclock::category::Category;
    use myrtio_wordclock::color::{BLACK, blend_colors};
    use myrtio_wordclock::diagnostics::{estimate_power_w, led_power_mw};
    use myrtio_wordclock::frame_scheduler::TIME_POLL_INTERVAL;
    use myrtio_wordclock::layout::{LedIndex, NUM_LEDS, is_excluded, second_led};
    use myrtio_wordclock::{
        BootError, BootState, Connectivity, EffectId, EngineConfig, FrameScheduler, Language,
        LightSource, Lights, OutputDriver, Renderer, Rgb, SecondsMode, SettingsChannel,
        SettingsIntent, TimeOfDay, TransitionTimings, WordClock,
    };

    const ONLINE: Connectivity = Connectivity {
        wifi_connected: true,
        captive_portal_active: false,
    };

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn time(hour: u8, minute: u8, second: u8) -> Option<TimeOfDay> {
        TimeOfDay::new(hour, minute, second)
    }

    fn lights_with_background() -> Lights {
        Lights {
            seconds: None,
            background: Some(LightSource::new(Rgb::new(26, 26, 26), 0.1)),
            ..Lights::default()
        }
    }

    fn static_config(timings: TransitionTimings) -> EngineConfig {
        EngineConfig {
            language: Language::EnglishUk,
            words_effect: EffectId::None,
            seconds_effect: EffectId::None,
            timings,
            ..EngineConfig::default()
        }
    }

    fn no_fades() -> TransitionTimings {
        TransitionTimings {
            words_fade_in: Duration::from_millis(0),
            words_fade_out: Duration::from_millis(0),
            seconds_fade_out: Duration::from_millis(0),
            typing_delay: Duration::from_millis(0),
        }
    }

    /// Sync at `start_ms` and tick until the boot transition is over
    fn boot_into(renderer: &mut WordClock, start_ms: u64, now: Option<TimeOfDay>) -> u64 {
        let mut ms = start_ms;
        assert_eq!(renderer.update(at(ms), now, ONLINE), Ok(true));
        while renderer.boot_state() != BootState::Complete {
            ms += 20;
            renderer.update(at(ms), now, ONLINE).unwrap();
            assert!(ms < start_ms + 60_000, "transition never completed");
        }
        // The frame after the transition is the first normal one.
        ms += 20;
        assert_eq!(renderer.update(at(ms), now, ONLINE), Ok(true));
        ms
    }

    #[test]
    fn test_ten_o_clock_static_frame() {
        let lights = lights_with_background();
        let mut renderer = WordClock::new(static_config(no_fades()), lights, at(0));
        boot_into(&mut renderer, 0, time(10, 0, 0));

        let hours = lights.resolve(Category::Hours);
        let background = lights.resolve(Category::Background);
        assert_ne!(background, BLACK);

        // IT IS TEN O'CLOCK
        let lit: [LedIndex; 13] = [17, 18, 20, 21, 217, 218, 219, 231, 230, 229, 228, 227, 226];
        let frame = renderer.frame();
        assert_eq!(frame.len(), NUM_LEDS);
        for (led, &color) in frame.iter().enumerate() {
            if is_excluded(led, NUM_LEDS) {
                assert_eq!(color, BLACK, "excluded LED {led} was written");
            } else if lit.iter().any(|&word| usize::from(word) == led) {
                assert_eq!(color, hours, "LED {led} should show the hours color");
            } else {
                assert_eq!(color, background, "LED {led} should show the background");
            }
        }
    }

    #[test]
    fn test_typing_minutes_in_reading_order() {
        let lights = lights_with_background();
        let timings = TransitionTimings {
            words_fade_in: Duration::from_millis(300),
            words_fade_out: Duration::from_millis(1000),
            seconds_fade_out: Duration::from_millis(0),
            typing_delay: Duration::from_millis(130),
        };
        let mut renderer = WordClock::new(static_config(timings), lights, at(0));
        let ms = boot_into(&mut renderer, 0, time(10, 1, 0));

        let minutes = lights.resolve(Category::Minutes);
        let background = lights.resolve(Category::Background);
        // ONE MINUTE PAST TEN -> TWO MINUTES PAST TEN: "TW" appear in that order.
        let (a, b) = (45, 44);
        assert_eq!(renderer.frame()[a], background);
        assert_eq!(renderer.frame()[b], background);

        let start = ms + 1000;
        assert_eq!(renderer.update(at(start), time(10, 2, 0), ONLINE), Ok(true));
        assert_eq!(renderer.last_changes().appearing, 3);
        assert_eq!(renderer.frame()[a], background);
        assert_eq!(renderer.frame()[b], background);

        assert_eq!(renderer.update(at(start + 130), time(10, 2, 0), ONLINE), Ok(true));
        let a_color = renderer.frame()[a];
        assert_ne!(a_color, background);
        assert_ne!(a_color, minutes);
        assert_eq!(renderer.frame()[b], background);

        assert_eq!(renderer.update(at(start + 430), time(10, 2, 0), ONLINE), Ok(true));
        assert_eq!(renderer.frame()[a], minutes);
        assert_eq!(renderer.frame()[b], minutes);
        assert!(!renderer.fades().typing().contains(a));
        assert!(!renderer.fades().typing().contains(b));
    }

    #[test]
    fn test_removed_word_fades_to_background() {
        let lights = lights_with_background();
        let timings = TransitionTimings {
            words_fade_in: Duration::from_millis(0),
            words_fade_out: Duration::from_millis(400),
            seconds_fade_out: Duration::from_millis(0),
            typing_delay: Duration::from_millis(0),
        };
        let mut renderer = WordClock::new(static_config(timings), lights, at(0));
        let ms = boot_into(&mut renderer, 0, time(10, 1, 0));
        let minutes = lights.resolve(Category::Minutes);
        let background = lights.resolve(Category::Background);
        // "ONE" loses LEDs 42 and 41 at 10:02.
        assert_eq!(renderer.frame()[41], minutes);

        let start = ms + 1000;
        renderer.update(at(start), time(10, 2, 0), ONLINE).unwrap();
        assert_eq!(renderer.last_changes().disappearing_words, 2);
        assert_eq!(renderer.frame()[41], minutes);
        // Words appear immediately when fade-in and delay are zero.
        assert_eq!(renderer.frame()[45], minutes);

        renderer.update(at(start + 200), time(10, 2, 0), ONLINE).unwrap();
        let middle = renderer.frame()[41];
        assert_eq!(middle, blend_colors(minutes, background, 0.5));

        renderer.update(at(start + 400), time(10, 2, 0), ONLINE).unwrap();
        assert_eq!(renderer.frame()[41], background);
        assert!(renderer.fades().word_fades().is_empty());
    }

    #[test]
    fn test_static_display_stops_rendering() {
        let lights = lights_with_background();
        let mut renderer = WordClock::new(static_config(no_fades()), lights, at(0));
        let ms = boot_into(&mut renderer, 0, time(10, 0, 0));

        assert_eq!(renderer.update(at(ms + 100), time(10, 0, 0), ONLINE), Ok(false));
        assert_eq!(renderer.update(at(ms + 200), time(10, 0, 1), ONLINE), Ok(true));
        assert_eq!(renderer.update(at(ms + 300), time(10, 0, 1), ONLINE), Ok(false));
    }

    #[test]
    fn test_animated_effect_is_rate_limited() {
        let config = EngineConfig {
            timings: no_fades(),
            ..EngineConfig::default()
        };
        let mut renderer = WordClock::new(config, Lights::default(), at(0));
        let ms = boot_into(&mut renderer, 0, time(10, 0, 0));

        assert_eq!(renderer.update(at(ms + 500), time(10, 0, 0), ONLINE), Ok(true));
        assert_eq!(renderer.update(at(ms + 501), time(10, 0, 0), ONLINE), Ok(false));
        assert!(renderer.time_until_next_frame(at(ms + 501)) > Duration::from_ticks(0));
    }

    #[test]
    fn test_seconds_ring_and_trail() {
        let lights = Lights {
            background: Some(LightSource::new(Rgb::new(26, 26, 26), 0.1)),
            ..Lights::default()
        };
        let mut config = static_config(TransitionTimings {
            seconds_fade_out: Duration::from_secs(3),
            ..no_fades()
        });
        config.seconds_mode = SecondsMode::Current;
        let mut renderer = WordClock::new(config, lights, at(0));
        let ms = boot_into(&mut renderer, 0, time(10, 0, 5));

        let seconds = lights.resolve(Category::Seconds);
        let background = lights.resolve(Category::Background);
        let five = usize::from(second_led(5).unwrap());
        let six = usize::from(second_led(6).unwrap());
        assert_eq!(renderer.frame()[five], seconds);

        renderer.update(at(ms + 1000), time(10, 0, 6), ONLINE).unwrap();
        assert_eq!(renderer.frame()[six], seconds);
        assert_eq!(renderer.frame()[five], blend_colors(seconds, background, 1.0 / 3.0));

        renderer.update(at(ms + 4000), time(10, 0, 9), ONLINE).unwrap();
        assert_eq!(renderer.frame()[five], background);
        assert!(!renderer.fades().seconds_fades().contains(five));
    }

    #[test]
    fn test_seconds_trail_starts_from_ambient_color() {
        let lights = Lights {
            background: Some(LightSource::new(Rgb::new(26, 26, 26), 0.1)),
            ..Lights::default()
        };
        let mut config = static_config(TransitionTimings {
            seconds_fade_out: Duration::from_secs(3),
            ..no_fades()
        });
        config.seconds_mode = SecondsMode::Current;
        config.seconds_effect = EffectId::Pulse;
        let mut renderer = WordClock::new(config, lights, at(0));
        let ms = boot_into(&mut renderer, 0, time(10, 0, 5));

        renderer.update(at(ms + 1000), time(10, 0, 6), ONLINE).unwrap();
        let seconds = lights.resolve(Category::Seconds);
        let background = lights.resolve(Category::Background);
        let five = usize::from(second_led(5).unwrap());
        assert_eq!(renderer.frame()[five], blend_colors(seconds, background, 1.0 / 3.0));
    }

    #[test]
    fn test_dark_hours_do_not_keep_typing() {
        let lights = Lights {
            hours: None,
            ..lights_with_background()
        };
        let timings = TransitionTimings {
            words_fade_in: Duration::from_millis(300),
            words_fade_out: Duration::from_millis(200),
            seconds_fade_out: Duration::from_millis(0),
            typing_delay: Duration::from_millis(50),
        };
        let mut renderer = WordClock::new(static_config(timings), lights, at(0));
        let mut ms = boot_into(&mut renderer, 0, time(10, 59, 0));

        // ONE MINUTE TO ELEVEN -> ELEVEN O'CLOCK: only hours words appear.
        ms += 1000;
        assert_eq!(renderer.update(at(ms), time(11, 0, 0), ONLINE), Ok(true));
        assert!(renderer.fades().typing().is_empty());

        for _ in 0..100 {
            ms += 20;
            renderer.update(at(ms), time(11, 0, 0), ONLINE).unwrap();
        }
        assert!(!renderer.fades().has_transients());
        ms += 200;
        assert_eq!(renderer.update(at(ms), time(11, 0, 0), ONLINE), Ok(false));
        assert_eq!(renderer.time_until_next_frame(at(ms)), TIME_POLL_INTERVAL);
    }

    #[test]
    fn test_power_off_blanks_the_frame() {
        let lights = lights_with_background();
        let mut renderer = WordClock::new(static_config(no_fades()), lights, at(0));
        let ms = boot_into(&mut renderer, 0, time(10, 0, 0));

        renderer.apply(SettingsIntent::Power(false), at(ms));
        assert!(!renderer.is_power_on());
        assert_eq!(renderer.update(at(ms + 10), time(10, 0, 0), ONLINE), Ok(true));
        assert!(renderer.frame().iter().all(|&color| color == BLACK));
        assert_eq!(renderer.power_estimate_w(), estimate_power_w(&[BLACK; NUM_LEDS]));

        renderer.apply(SettingsIntent::Power(true), at(ms + 20));
        renderer.update(at(ms + 30), time(10, 0, 0), ONLINE).unwrap();
        assert_eq!(renderer.frame()[217], lights.resolve(Category::Hours));
    }

    #[test]
    fn test_language_change_types_new_words() {
        let lights = lights_with_background();
        let timings = TransitionTimings {
            words_fade_in: Duration::from_millis(300),
            words_fade_out: Duration::from_millis(500),
            seconds_fade_out: Duration::from_millis(0),
            typing_delay: Duration::from_millis(50),
        };
        let mut renderer = WordClock::new(static_config(timings), lights, at(0));
        let ms = boot_into(&mut renderer, 0, time(10, 0, 0));

        renderer.apply(SettingsIntent::Language(Language::French), at(ms + 100));
        // IL EST DIX HEURES, every LED treated as new
        assert_eq!(renderer.last_changes().appearing, 14);
        assert_eq!(renderer.last_changes().disappearing_words, 0);
        assert!(renderer.fades().typing().contains(81));

        renderer.update(at(ms + 5000), time(10, 0, 0), ONLINE).unwrap();
        renderer.update(at(ms + 5200), time(10, 0, 0), ONLINE).unwrap();
        assert_eq!(renderer.frame()[81], lights.resolve(Category::Hours));
        assert_eq!(renderer.frame()[217], lights.resolve(Category::Background));
    }

    #[test]
    fn test_boot_timeout_from_update() {
        let config = EngineConfig {
            boot_timeout: Duration::from_secs(2),
            ..EngineConfig::default()
        };
        let mut renderer = WordClock::new(config, Lights::default(), at(0));
        let offline = Connectivity::default();

        assert_eq!(renderer.update(at(0), None, offline), Ok(true));
        assert_eq!(renderer.boot_state(), BootState::WaitingWifi);
        assert_eq!(
            renderer.update(at(2000), None, offline),
            Err(BootError::TimeSyncTimeout { waited_s: 2 })
        );
        assert!(renderer.update(at(2100), None, offline).is_ok());
        assert!(renderer.update(at(2200), None, offline).is_ok());
    }

    #[test]
    fn test_power_estimate() {
        assert_eq!(led_power_mw(BLACK), 5.0);
        assert_eq!(led_power_mw(Rgb::new(255, 255, 255)), 185.0);
        // 240 driven LEDs idle at 5 mW each
        assert!((estimate_power_w(&[BLACK; NUM_LEDS]) - 1.2).abs() < 1e-4);
    }

    /// Records every frame written to the strip
    #[derive(Default)]
    struct RecordingDriver {
        frames: Vec<Vec<Rgb>>,
    }

    impl OutputDriver for RecordingDriver {
        fn write(&mut self, colors: &[Rgb]) {
            self.frames.push(colors.to_vec());
        }
    }

    #[test]
    fn test_frame_scheduler_applies_settings_before_rendering() {
        let channel = SettingsChannel::<4>::new();
        let lights = lights_with_background();
        let renderer = Renderer::<NUM_LEDS>::new(static_config(no_fades()), lights, at(0));
        let mut scheduler =
            FrameScheduler::new(renderer, RecordingDriver::default(), channel.receiver());

        let result = scheduler.tick(at(0), None, ONLINE).unwrap();
        assert!(result.rendered);
        assert!(result.sleep_duration <= TIME_POLL_INTERVAL);
        assert_eq!(scheduler.output().frames.len(), 1);

        let mut ms = 0;
        while scheduler.renderer().boot_state() != BootState::Complete {
            ms += 20;
            scheduler.tick(at(ms), time(10, 0, 0), ONLINE).unwrap();
        }
        ms += 20;
        scheduler.tick(at(ms), time(10, 0, 0), ONLINE).unwrap();
        assert_eq!(scheduler.output().frames.last().unwrap()[217], lights.resolve(Category::Hours));

        channel.sender().try_send(SettingsIntent::Power(false)).unwrap();
        ms += 20;
        let result = scheduler.tick(at(ms), time(10, 0, 0), ONLINE).unwrap();
        assert!(result.rendered);
        assert!(scheduler.output().frames.last().unwrap().iter().all(|&c| c == BLACK));

        ms += 200;
        let result = scheduler.tick(at(ms), time(10, 0, 0), ONLINE).unwrap();
        assert!(!result.rendered);
        assert!(result.sleep_duration <= TIME_POLL_INTERVAL);
        assert!(!scheduler.renderer().is_power_on());
    }

    #[test]
    fn test_static_display_sleeps_between_ticks() {
        let channel = SettingsChannel::<4>::new();
        let renderer =
            Renderer::<NUM_LEDS>::new(static_config(no_fades()), lights_with_background(), at(0));
        let mut scheduler =
            FrameScheduler::new(renderer, RecordingDriver::default(), channel.receiver());

        let mut ms = 0;
        while scheduler.renderer().boot_state() != BootState::Complete {
            ms += 20;
            scheduler.tick(at(ms), time(10, 0, 0), ONLINE).unwrap();
        }
        ms += 20;
        assert!(scheduler.tick(at(ms), time(10, 0, 0), ONLINE).unwrap().rendered);
        let written = scheduler.output().frames.len();

        for _ in 0..50 {
            ms += 10;
            let result = scheduler.tick(at(ms), time(10, 0, 0), ONLINE).unwrap();
            assert!(!result.rendered);
            assert_eq!(result.sleep_duration, TIME_POLL_INTERVAL);
        }
        assert_eq!(scheduler.output().frames.len(), written);
    }

    #[test]
    fn test_animated_display_sleeps_after_a_frame() {
        let channel = SettingsChannel::<4>::new();
        let config = EngineConfig {
            timings: no_fades(),
            ..EngineConfig::default()
        };
        let renderer = Renderer::<NUM_LEDS>::new(config, Lights::default(), at(0));
        let mut scheduler =
            FrameScheduler::new(renderer, RecordingDriver::default(), channel.receiver());

        let mut ms = 0;
        while scheduler.renderer().boot_state() != BootState::Complete {
            ms += 20;
            scheduler.tick(at(ms), time(10, 0, 0), ONLINE).unwrap();
        }
        ms += 20;
        let result = scheduler.tick(at(ms), time(10, 0, 0), ONLINE).unwrap();
        assert!(result.rendered);
        assert!(result.sleep_duration > Duration::from_ticks(0));

        // A new second renders at once and restarts the wait.
        ms += 5;
        let result = scheduler.tick(at(ms), time(10, 0, 1), ONLINE).unwrap();
        assert!(result.rendered);
        assert!(result.sleep_duration > Duration::from_ticks(0));
    }
}
