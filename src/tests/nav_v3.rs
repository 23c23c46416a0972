#[cfg(test)]
mod test {
    use crate::layout::Field;
    use crate::prelude::*;
    use crate::tests::toolkit::{gpst, test_resource, V3_QZSS};

    #[test]
    fn v3_qzss() {
        let nav =
            NavigationFile::from_file(test_resource(V3_QZSS), None, DuplicatePolicy::default());
        assert!(nav.is_ok(), "failed to parse {}: {:?}", V3_QZSS, nav.err());
        let nav = nav.unwrap();

        let header = &nav.header;
        assert_eq!(header.version, Version::new(3, 2));
        assert_eq!(header.constellation, Constellation::QZSS);
        assert_eq!(header.program.as_deref(), Some("NetR9 5.45"));
        assert_eq!(header.run_by.as_deref(), Some("Receiver Operator"));
        assert_eq!(header.date.as_deref(), Some("20210319 000000 UTC"));

        let kb = header.ionod_corrections.get(&Constellation::QZSS).unwrap();
        assert_eq!(kb.alpha, (1.1176E-08, 2.2352E-08, -5.9605E-08, -1.1921E-07));
        assert_eq!(kb.beta, (1.1264E+05, 9.8304E+04, -6.5536E+04, -5.2429E+05));
        assert!(header.ionod_corrections.get(&Constellation::GPS).is_none());

        assert_eq!(
            header.time_corrections,
            vec![TimeSystemCorrection {
                kind: "QZUT".to_string(),
                a0: -1.8626451492E-09,
                a1: -8.881784197E-16,
                t_ref: 432_000.0,
                week: 2149,
            }]
        );

        let leap = header.leap.unwrap();
        assert_eq!(leap.leap, 18);
        assert_eq!(leap.delta_tls, Some(18));
        assert_eq!(leap.week, Some(2185));
        assert_eq!(leap.day, Some(7));
        assert_eq!(leap.system, None);

        assert_eq!(nav.skipped(), 0);
        assert_eq!(nav.store.len(), 2);

        let j01 = SV::new(Constellation::QZSS, 1);
        let j02 = SV::new(Constellation::QZSS, 2);
        assert_eq!(nav.store.satellites().collect::<Vec<_>>(), vec![j01, j02]);

        let toc = gpst(2021, 3, 19, 0, 0, 0.0);

        let record = &nav.store.records(j01)[0];
        assert_eq!(record.toc, toc);
        assert_eq!(
            record.sv_clock(),
            Some((-1.689642667770E-06, -1.136868377220E-13, 0.0))
        );
        assert_eq!(record.get(Field::Crs), Some(-427.78125));
        assert_eq!(record.get(Field::Eccentricity), Some(7.505493471390E-02));
        assert_eq!(record.get(Field::SqrtA), Some(6493.18998146));
        assert_eq!(record.get(Field::Toe), Some(432_000.0));
        assert_eq!(record.get(Field::Omega), Some(-1.57246213722));
        assert_eq!(record.get(Field::CodesL2), Some(2.0));
        assert_eq!(record.get(Field::SvAccuracy), Some(2.8));
        assert_eq!(record.get(Field::Iodc), Some(925.0));
        assert_eq!(record.get(Field::FitInterval), Some(0.0));
        assert_eq!(record.week(), Some(2149));

        // fit interval is optional in this revision
        let record = &nav.store.records(j02)[0];
        assert_eq!(record.toc, toc);
        assert_eq!(record.get(Field::TransmissionTime), Some(429_618.0));
        assert_eq!(record.get(Field::FitInterval), None);
        assert_eq!(record.orbits.len(), 28);

        let toe = record.toe().unwrap();
        assert!((toe - toc).abs() < Duration::from_seconds(1.0E-6));
    }
    #[test]
    fn v3_constellation_filter() {
        let path = test_resource(V3_QZSS);
        let nav =
            NavigationFile::from_file(&path, Some(Constellation::GPS), DuplicatePolicy::default())
                .unwrap();
        assert!(nav.store.is_empty());

        let nav =
            NavigationFile::from_file(&path, Some(Constellation::QZSS), DuplicatePolicy::default())
                .unwrap();
        assert_eq!(nav.store.len(), 2);
    }
}
