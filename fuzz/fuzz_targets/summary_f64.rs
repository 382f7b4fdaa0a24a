#![no_main]
use std::io::Cursor;

use byteorder::{BigEndian, ReadBytesExt};
use gk_quantiles::greenwald_khanna::Summary;
use gk_quantiles::util::SplitMix64;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut cursor = Cursor::new(data);

    // unbounded, out of range values must be rejected cleanly
    let epsilon: f64 = if let Ok(res) = cursor.read_f64::<BigEndian>() {
        res
    } else {
        return;
    };
    // bounded 2**16
    let upper_bound: u32 = if let Ok(res) = cursor.read_u32::<BigEndian>() {
        res % 65_536
    } else {
        return;
    };
    // unbounded
    let seed: u64 = if let Ok(res) = cursor.read_u64::<BigEndian>() {
        res
    } else {
        return;
    };
    let phi: f64 = cursor.read_f64::<BigEndian>().unwrap_or(0.5);

    let mut summary = match Summary::new(epsilon) {
        Ok(summary) => summary,
        Err(_) => return,
    };
    let mut rng = SplitMix64::new(seed);
    for _ in 0..upper_bound {
        summary
            .insert(rng.next_exp(1000.0))
            .expect("summary invariants broken");
    }

    let total: usize = summary.tuples().iter().map(|t| t.g).sum();
    assert_eq!(total, summary.count());
    let _ = summary.query(phi);
    let _ = summary.query_with_rank(phi);
});
