mod integration {
    mod summary {
        use gk_quantiles::greenwald_khanna::{CompressPolicy, Summary};
        use gk_quantiles::util::SplitMix64;
        use gk_quantiles::Error;
        use std::fs::File;
        use std::io::Read;
        use std::path::PathBuf;
        use std::str::FromStr;

        // 999 draws of ExpFloat64() * 1000 from Go's math/rand seeded with 99
        fn go_exponential_samples() -> Vec<f64> {
            let mut resource = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
            resource.push("resources/go_exp_seed99.txt");

            let mut f = File::open(resource).expect("could not open resource file");
            let mut buffer = String::new();
            f.read_to_string(&mut buffer)
                .expect("could not read resource file");

            let samples: Vec<f64> = buffer
                .lines()
                .filter(|l| !l.starts_with('#'))
                .map(|l| f64::from_str(l.trim()).expect("malformed sample"))
                .collect();
            assert_eq!(samples.len(), 999);
            samples
        }

        fn exponential_stream(epsilon: f64) -> Summary<f64> {
            let mut summary = Summary::new(epsilon).unwrap();
            for v in go_exponential_samples() {
                summary.insert(v).unwrap();
            }
            summary
        }

        #[test]
        fn test_nine_integers() {
            let mut summary = Summary::new(0.025).unwrap();
            for i in 1..10i32 {
                summary.insert(f64::from(i)).unwrap();
            }

            assert_eq!(summary.query(0.95).unwrap(), 8.0);
        }

        #[test]
        fn test_seeded_median() {
            let summary = exponential_stream(0.025);

            let v = summary.query(0.50).unwrap();
            assert!((v - 758.575157).abs() < 0.000_001, "got {}", v);
            assert_eq!(summary.count(), 999);
        }

        #[test]
        fn test_seeded_len() {
            let summary = exponential_stream(0.01);

            assert_eq!(summary.len(), 131);
            assert_eq!(summary.tuples().iter().map(|t| t.g).sum::<usize>(), 999);
        }

        #[test]
        fn test_seeded_rank_bounds() {
            let epsilon = 0.01;
            let summary = exponential_stream(epsilon);

            let mut data = go_exponential_samples();
            data.sort_by(|a, b| a.partial_cmp(b).unwrap());

            let slop = epsilon * (data.len() as f64) + 1.0;
            for k in 0..=100i32 {
                let phi = f64::from(k) / 100.0;
                let est = summary.query_with_rank(phi).unwrap();
                assert_eq!(est.value, summary.query(phi).unwrap());

                let rank = data.partition_point(|x| *x < est.value) + 1;
                assert!(est.rank_min <= rank && rank <= est.rank_max);
                assert!(((rank as f64) - phi * (data.len() as f64)).abs() <= slop);
            }

            assert_eq!(summary.query(0.0).unwrap(), data[0]);
            assert_eq!(summary.query(1.0).unwrap(), data[data.len() - 1]);
        }

        #[test]
        fn test_manual_matches_periodic_guarantee() {
            let mut rng = SplitMix64::new(7);
            let mut manual = Summary::with_policy(0.02, CompressPolicy::Manual).unwrap();
            for _ in 0..5000 {
                manual.insert(rng.next_f64()).unwrap();
                if manual.count() % 500 == 0 {
                    manual.compress();
                }
            }

            for t in &manual.tuples()[1..manual.len() - 1] {
                assert!(t.g + t.delta <= manual.error_bound());
            }
            let median = manual.query(0.5).unwrap();
            assert!((median - 0.5).abs() < 0.05, "median {}", median);
        }

        #[test]
        fn test_errors_surface() {
            assert!(matches!(
                Summary::<f64>::new(0.6),
                Err(Error::InvalidArgument { name: "epsilon", .. })
            ));

            let mut summary = Summary::new(0.1).unwrap();
            assert_eq!(summary.query(0.5), Err(Error::Empty));
            summary.insert(1.0).unwrap();
            assert!(matches!(
                summary.query(2.0),
                Err(Error::InvalidArgument { name: "phi", .. })
            ));
        }
    }
}
