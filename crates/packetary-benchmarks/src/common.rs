//! Shared configuration and input generators for benchmarks

use std::time::Duration;

use criterion::Criterion;
use pprof::criterion::{Output, PProfProfiler};

/// Criterion with flamegraph profiling enabled
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(Duration::from_secs(3))
        .measurement_time(Duration::from_secs(10))
        .sample_size(100)
        .with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
}

/// Debian-style version strings of increasing shape complexity.
///
/// Mixes release-less and lexical tokens, so these parse and compare but
/// must not be sorted with `slice::sort`.
pub fn sample_versions(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| match i % 4 {
            0 => format!("{}.{}", i / 10, i % 10),
            1 => format!("{}.{}.{}-{}", i / 100, i % 100, i % 7, i % 3 + 1),
            2 => format!("{}:{}.{}~rc{}-{}ubuntu{}", i % 3, i / 50, i % 50, i % 5, i % 9, i % 4),
            _ => format!("{}.{}+dfsg.{}-{}.{}", i / 20, i % 20, i % 11, i % 6, i % 2),
        })
        .collect()
}

/// Versions the ordering is total over: digit-only segments, each with a release
pub fn sortable_versions(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            format!(
                "{}:{}.{}.{}-{}.{}",
                i % 2,
                (i * 7919) % 23,
                (i * 104729) % 101,
                i % 9,
                (i * 31) % 17 + 1,
                i % 3
            )
        })
        .collect()
}

/// Mirror configuration document in TOML with `count` repositories and packages
pub fn mirror_toml(count: usize) -> String {
    let mut doc = String::from("requirements = [\n");
    for i in 0..count {
        doc.push_str(&format!(
            "    [[\"lib{i}\"], [\"lib{i}-compat\", \">=\", \"{}.{}\"]],\n",
            i % 5,
            i % 13
        ));
    }
    doc.push_str("]\n");

    for i in 0..count {
        doc.push_str(&format!(
            "\n[[repository]]\nname = \"repo{i}\"\nurl = \"http://mirror.example.com/{i}/\"\nsection = [\"trusty\", \"main\"]\npriority = {}\n",
            i % 1000
        ));
    }

    for i in 0..count {
        doc.push_str(&format!(
            "\n[[package]]\nname = \"pkg{i}\"\nversion = \"1:{}.{}-{}\"\nrequires = [[[\"lib{i}\", \"<\", \"2\"]]]\n",
            i / 10,
            i % 10,
            i % 4 + 1
        ));
    }

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use packetary_config::parse_mirror_toml;
    use packetary_core::error::PacketaryError;
    use packetary_core::types::Version;

    fn parse_all(inputs: &[String]) -> Vec<Version> {
        inputs.iter().map(|v| Version::parse(v).unwrap()).collect()
    }

    #[test]
    fn test_sortable_versions_sort() {
        let mut versions = parse_all(&sortable_versions(10000));
        Version::try_sort(&mut versions).unwrap();
        assert!(versions.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_sample_versions_are_not_sortable() {
        let mut versions = parse_all(&sample_versions(1000));
        assert!(matches!(
            Version::try_sort(&mut versions),
            Err(PacketaryError::Unorderable { .. })
        ));
    }

    #[test]
    fn test_mirror_toml_parses() {
        let config = parse_mirror_toml(&mirror_toml(20)).unwrap();
        assert_eq!(config.repositories.len(), 20);
        assert_eq!(config.packages.len(), 20);
    }
}
