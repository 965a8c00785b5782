#[cfg(test)]
mod telemetry_report_tests {
    use std::time::Duration;

    use celfie_core::{
        telemetry::{EncodeReport, Stage, StageTimes, StegoCounters, TelemetryTimer},
        PixelShape, StegoEngine,
    };

    fn make_counters() -> StegoCounters {
        let mut c = StegoCounters::default();
        c.add_payload(100, 60, 76, 150);
        c.add_embed(1200, 4000);
        c
    }

    fn make_timer() -> TelemetryTimer {
        let mut timer = TelemetryTimer::new();
        std::thread::sleep(Duration::from_millis(20));
        timer.stage_times.add(Stage::BuildEnvelope, Duration::from_millis(5));
        timer.stage_times.add(Stage::WriteBits, Duration::from_millis(10));
        timer.finish();
        timer
    }

    #[test]
    fn report_copies_counters_and_ratios() {
        let report = EncodeReport::from(&make_counters(), &make_timer());
        assert_eq!(report.bytes_plaintext, 100);
        assert_eq!(report.bytes_envelope, 150);
        assert!((report.compression_ratio - 0.6).abs() < 1e-9);
        assert!((report.utilization - 0.3).abs() < 1e-9);
        assert!(report.elapsed >= Duration::from_millis(20));
        assert!(report.sanity_check());
    }

    #[test]
    fn sanity_check_catches_bit_mismatch() {
        let mut c = make_counters();
        c.bits_written += 1;
        assert!(!EncodeReport::from(&c, &make_timer()).sanity_check());
    }

    #[test]
    fn zero_counters_do_not_divide_by_zero() {
        let report = EncodeReport::from(&StegoCounters::default(), &make_timer());
        assert_eq!(report.compression_ratio, 0.0);
        assert_eq!(report.utilization, 0.0);
    }

    #[test]
    fn stage_times_accumulate() {
        let mut st = StageTimes::default();
        st.add(Stage::ReadHeader, Duration::from_millis(2));
        st.add(Stage::ReadHeader, Duration::from_millis(3));
        assert_eq!(st.get(Stage::ReadHeader), Duration::from_millis(5));
        assert_eq!(st.get(Stage::ParseEnvelope), Duration::ZERO);
        assert!((st.get_ms(Stage::ReadHeader) - 5.0).abs() < 1e-9);
        assert!(st.has_all(&[Stage::ReadHeader]));
        assert!(!st.has_all(&[Stage::ReadHeader, Stage::ReadCiphertext]));
    }

    #[test]
    fn counters_overhead() {
        assert_eq!(make_counters().overhead_bytes(), 90);
    }

    #[test]
    fn engine_report_is_consistent_and_serializes() {
        let shape = PixelShape::rgb(64, 64);
        let pixels: Vec<u8> = (0..64 * 64 * 3).map(|i: usize| (i * 31 + 7) as u8).collect();
        let (_, report) = StegoEngine::default()
            .encode_with_report(&pixels, shape, "report me", Some("https://x.test"))
            .unwrap();

        assert!(report.sanity_check());
        assert_eq!(report.bits_available, 64 * 64 * 3);
        assert_eq!(report.bits_written, report.bytes_envelope * 8);
        assert!(report.stage_times.has_all(&[Stage::BuildEnvelope, Stage::CheckCapacity, Stage::WriteBits]));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["bytes_envelope"], report.bytes_envelope);
        assert_eq!(json["bits_available"], 64 * 64 * 3);
        assert!(json["stage_times"]["times"].get("write_bits").is_none());
        assert!(json["stage_times"]["times"].get("WriteBits").is_some());
    }
}
