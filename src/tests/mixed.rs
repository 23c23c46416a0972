#[cfg(test)]
mod test {
    use crate::layout::Field;
    use crate::prelude::*;
    use crate::tests::toolkit::{test_resource_content, V3_QZSS};

    const MIXED_HEADER: &str =
        "     3.02           N: GNSS NAV DATA    M: MIXED            RINEX VERSION / TYPE
                                                            END OF HEADER
";

    const R07: &str = "R07 2021 03 19 00 15 00-1.325305551290E-04 0.000000000000E+00 4.320000000000E+05
    -1.424785156250E+04 1.311302185060E+00 9.313225746150E-10 0.000000000000E+00
    -1.493016699220E+04-1.454113006590E+00 9.313225746150E-10 5.000000000000E+00
     1.513476562500E+04-2.751159667970E+00-1.862645149230E-09 0.000000000000E+00
";

    const E11: &str = "E11 2021 03 19 00 00 00-5.095333792270E-04-8.264500424030E-12 0.000000000000E+00
     6.500000000000E+01-1.200000000000E+02 3.100000000000E-09 8.100000000000E-01
    -5.500000000000E-06 1.700000000000E-04 8.600000000000E-06 5.440610000000E+03
     4.320000000000E+05 1.100000000000E-08-2.100000000000E+00 5.700000000000E-08
     9.700000000000E-01 1.853000000000E+02-4.300000000000E-01-5.300000000000E-09
    -1.800000000000E-10 5.170000000000E+02 2.149000000000E+03 0.000000000000E+00
     3.120000000000E+00 0.000000000000E+00-1.600000000000E-08-1.800000000000E-08
     4.326850000000E+05
";

    /// J01 record of the QZSS test file
    fn j01() -> String {
        test_resource_content(V3_QZSS)
            .lines()
            .skip(7)
            .take(8)
            .map(|line| line.to_string() + "\n")
            .collect()
    }

    /// Mixed file: R07, J01, E11 then G05 (J01 orbit published as GPS)
    fn mixed() -> String {
        let g05 = j01().replacen("J01", "G05", 1);
        [MIXED_HEADER, R07, &j01(), E11, &g05].concat()
    }

    #[test]
    fn mixed_constellations() {
        let content = mixed();
        let mut reader = content.as_bytes();
        let nav = NavigationFile::parse(&mut reader, None, DuplicatePolicy::default()).unwrap();
        assert_eq!(nav.header.constellation, Constellation::Mixed);
        assert_eq!(nav.skipped(), 0);
        assert_eq!(nav.store.len(), 2);

        let g05 = SV::new(Constellation::GPS, 5);
        let j01 = SV::new(Constellation::QZSS, 1);
        assert_eq!(nav.store.satellites().collect::<Vec<_>>(), vec![j01, g05]);

        for sv in [g05, j01] {
            let record = &nav.store.records(sv)[0];
            assert_eq!(record.get(Field::SqrtA), Some(6493.18998146));
            assert_eq!(record.week(), Some(2149));
        }
    }
    #[test]
    fn mixed_constellation_filter() {
        let content = mixed();

        let mut reader = content.as_bytes();
        let nav =
            NavigationFile::parse(&mut reader, Some(Constellation::QZSS), DuplicatePolicy::default())
                .unwrap();
        assert_eq!(
            nav.store.satellites().collect::<Vec<_>>(),
            vec![SV::new(Constellation::QZSS, 1)]
        );

        let mut reader = content.as_bytes();
        let nav =
            NavigationFile::parse(&mut reader, Some(Constellation::GPS), DuplicatePolicy::default())
                .unwrap();
        assert_eq!(
            nav.store.satellites().collect::<Vec<_>>(),
            vec![SV::new(Constellation::GPS, 5)]
        );

        let mut reader = content.as_bytes();
        let nav = NavigationFile::parse(
            &mut reader,
            Some(Constellation::Galileo),
            DuplicatePolicy::default(),
        )
        .unwrap();
        assert!(nav.store.is_empty());
    }
    #[test]
    fn glonass_record_is_shorter() {
        // Glonass record followed by the end of file: not an error
        let content = [MIXED_HEADER, R07].concat();
        let nav = content.parse::<NavigationFile>().unwrap();
        assert!(nav.store.is_empty());
        assert_eq!(nav.skipped(), 0);

        // Glonass record right after a GPS record
        let content = [MIXED_HEADER, &j01().replacen("J01", "G05", 1), R07, &j01()].concat();
        let nav = content.parse::<NavigationFile>().unwrap();
        assert_eq!(nav.store.len(), 2);
        assert_eq!(nav.skipped(), 0);
    }
}
