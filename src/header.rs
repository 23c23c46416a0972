//! Describes a navigation file `header`
use log::{debug, error, warn};

use crate::{
    error::ParsingError,
    ionosphere::KbModel,
    leap::Leap,
    prelude::Constellation,
    token::tokens,
    version::Version,
};

use std::{collections::HashMap, io::BufRead, str::FromStr};

/// Time system correction, as broadcast in `DELTA-UTC` (RINEX2)
/// and `TIME SYSTEM CORR` (RINEX3) header lines.
/// Correction (s) = a0 + a1 * (t - t_ref)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSystemCorrection {
    /// Correction type, for example "GPUT" (GPS to UTC) or "QZGS" (QZSS to GPS)
    pub kind: String,
    /// Bias (s)
    pub a0: f64,
    /// Drift (s.s⁻¹)
    pub a1: f64,
    /// Reference time, in seconds of week
    pub t_ref: f64,
    /// Reference week
    pub week: u32,
}

impl TimeSystemCorrection {
    /// Decodes the four terms of a correction line (label removed)
    fn parse(kind: &str, content: &str) -> Option<Self> {
        let values = tokens(content).collect::<Result<Vec<_>, _>>().ok()?;
        match values[..] {
            [a0, a1, t_ref, week] if week >= 0.0 => Some(Self {
                kind: kind.to_string(),
                a0,
                a1,
                t_ref,
                week: week as u32,
            }),
            _ => None,
        }
    }
}

/// Navigation file [Header]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    /// Revision
    pub version: Version,
    /// Satellite system described by this file.
    /// [Constellation::Mixed] for multi constellation files.
    pub constellation: Constellation,
    /// Program that generated this file
    pub program: Option<String>,
    /// Agency that generated this file
    pub run_by: Option<String>,
    /// Date of creation, as is
    pub date: Option<String>,
    /// Comments, as is
    pub comments: Vec<String>,
    /// Klobuchar parameters, per constellation
    pub ionod_corrections: HashMap<Constellation, KbModel>,
    /// Time system corrections
    pub time_corrections: Vec<TimeSystemCorrection>,
    /// Leap second information
    pub leap: Option<Leap>,
    /// Observable declarations, kept for observation file readers
    pub obs_types: HashMap<Constellation, Vec<String>>,
    /// Number of lines consumed, `END OF HEADER` included:
    /// the first record starts on the next line.
    pub lines: usize,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            version: Version::default(),
            constellation: Constellation::GPS,
            program: None,
            run_by: None,
            date: None,
            comments: Vec::new(),
            ionod_corrections: HashMap::with_capacity(2),
            time_corrections: Vec::new(),
            leap: None,
            obs_types: HashMap::new(),
            lines: 0,
        }
    }
}

/// Returns a trimmed, non empty [start, end[ slice as String
fn text_field(content: &str, start: usize, end: usize) -> Option<String> {
    let field = content.get(start..end.min(content.len()))?.trim();
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

impl Header {
    /// Parse [Header] by consuming `reader` until the end of this section.
    /// The reader is left positioned on the first body line.
    pub fn parse<R: BufRead>(reader: &mut R) -> Result<Self, ParsingError> {
        let mut header = Header::default();
        let mut version = Option::<Version>::None;
        let mut file_type = Option::<char>::None;
        let mut system = Option::<char>::None;
        let mut obs_system = Option::<Constellation>::None;
        let mut end_of_header = false;

        for line in reader.lines() {
            let line = line?;
            header.lines += 1;

            let (content, marker) = match line.char_indices().nth(60) {
                Some((offset, _)) => line.split_at(offset),
                None => (line.as_str(), ""),
            };
            let marker = marker.trim();

            if marker.eq("END OF HEADER") || line.trim().eq("END OF HEADER") {
                end_of_header = true;
                break;
            }

            if marker.eq("COMMENT") {
                header.comments.push(content.trim().to_string());
            } else if marker.contains("RINEX VERSION / TYPE") {
                let vers = content.get(0..9).unwrap_or(content).trim();
                version = Some(
                    Version::from_str(vers)
                        .map_err(|_| ParsingError::VersionParsing(vers.to_string()))?,
                );
                file_type = content.get(20..21).and_then(|c| c.chars().next());
                system = content
                    .get(40..41)
                    .and_then(|c| c.chars().next())
                    .filter(|c| !c.is_whitespace());
            } else if marker.contains("PGM / RUN BY / DATE") {
                header.program = text_field(content, 0, 20);
                header.run_by = text_field(content, 20, 40);
                header.date = text_field(content, 40, 60);
            } else if marker.contains("ION ALPHA") {
                if let Some(alpha) = KbModel::parse_coefficients(content) {
                    for c in [Constellation::GPS, Constellation::QZSS] {
                        header.ionod_corrections.entry(c).or_default().alpha = alpha;
                    }
                } else {
                    warn!("line {}: invalid ION ALPHA", header.lines);
                }
            } else if marker.contains("ION BETA") {
                if let Some(beta) = KbModel::parse_coefficients(content) {
                    for c in [Constellation::GPS, Constellation::QZSS] {
                        header.ionod_corrections.entry(c).or_default().beta = beta;
                    }
                } else {
                    warn!("line {}: invalid ION BETA", header.lines);
                }
            } else if marker.contains("IONOSPHERIC CORR") {
                // GPSA, GPSB, QZSA, QZSB.. other models are not broadcast for GPS/QZSS
                let (model_id, coefficients) = content.split_at(content.len().min(5));
                let model_id = model_id.trim();
                let constellation = match model_id.get(..3) {
                    Some("GPS") => Constellation::GPS,
                    Some("QZS") => Constellation::QZSS,
                    _ => {
                        debug!("line {}: ignored \"{}\" ionosphere model", header.lines, model_id);
                        continue;
                    },
                };
                match KbModel::parse_coefficients(coefficients) {
                    Some(coefficients) => {
                        let kb_model = header.ionod_corrections.entry(constellation).or_default();
                        if model_id.ends_with('A') {
                            kb_model.alpha = coefficients;
                        } else {
                            kb_model.beta = coefficients;
                        }
                    },
                    None => warn!("line {}: invalid {} model", header.lines, model_id),
                }
            } else if marker.contains("DELTA-UTC") {
                // RINEX2 : GPS to UTC
                match TimeSystemCorrection::parse("GPUT", content) {
                    Some(correction) => header.time_corrections.push(correction),
                    None => warn!("line {}: invalid DELTA-UTC", header.lines),
                }
            } else if marker.contains("TIME SYSTEM CORR") {
                let (kind, terms) = content.split_at(content.len().min(5));
                match TimeSystemCorrection::parse(kind.trim(), terms) {
                    Some(correction) => header.time_corrections.push(correction),
                    None => warn!("line {}: invalid TIME SYSTEM CORR", header.lines),
                }
            } else if marker.contains("LEAP SECONDS") {
                match Leap::from_str(content) {
                    Ok(leap) => header.leap = Some(leap),
                    Err(e) => warn!("line {}: leap second parsing: {}", header.lines, e),
                }
            } else if marker.contains("# / TYPES OF OBSERV") {
                // RINEX2: counter, then up to nine codes per line
                let codes = content.get(6..).unwrap_or("");
                let constellation = match system {
                    Some(c) => Constellation::from_str(&c.to_string()).unwrap_or(Constellation::Mixed),
                    None => Constellation::GPS,
                };
                header
                    .obs_types
                    .entry(constellation)
                    .or_default()
                    .extend(codes.split_ascii_whitespace().map(|c| c.to_string()));
            } else if marker.contains("SYS / # / OBS TYPES") {
                // RINEX3: system letter, counter, then codes.
                // Continuation lines have a blank system.
                let letter = content.get(0..1).unwrap_or("").trim();
                if !letter.is_empty() {
                    obs_system = Constellation::from_str(letter).ok();
                }
                if let Some(constellation) = obs_system {
                    let codes = content.get(6..).unwrap_or("");
                    header
                        .obs_types
                        .entry(constellation)
                        .or_default()
                        .extend(codes.split_ascii_whitespace().map(|c| c.to_string()));
                }
            } else {
                debug!("line {}: unhandled \"{}\"", header.lines, marker);
            }
        }

        if !end_of_header {
            return Err(ParsingError::MissingHeaderDelimiter);
        }

        let version = version.ok_or(ParsingError::VersionParsing(String::from("missing")))?;
        if !version.is_supported() {
            error!("RINEX {} is not supported", version);
            return Err(ParsingError::UnsupportedFormat(format!("RINEX {}", version)));
        }
        header.version = version;

        if file_type != Some('N') {
            error!("not a navigation file");
            return Err(ParsingError::NotNavigationData);
        }

        header.constellation = if version.major < 3 {
            // RINEX2: 'N' is GPS navigation data (GLONASS and SBAS use other types)
            Constellation::GPS
        } else {
            match system {
                Some('G') => Constellation::GPS,
                Some('J') => Constellation::QZSS,
                Some('M') => Constellation::Mixed,
                other => {
                    let system = other.map(|c| c.to_string()).unwrap_or_default();
                    error!("unsupported satellite system \"{}\"", system);
                    return Err(ParsingError::UnsupportedFormat(format!(
                        "satellite system \"{}\"",
                        system
                    )));
                },
            }
        };

        debug!(
            "RINEX {} {} navigation: header spans {} lines",
            header.version, header.constellation, header.lines
        );

        Ok(header)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::BufReader;

    fn parse(content: &str) -> Result<Header, ParsingError> {
        let mut reader = BufReader::new(content.as_bytes());
        Header::parse(&mut reader)
    }
    #[test]
    fn rinex2_header() {
        let content = "     2.11           N: GPS NAV DATA                         RINEX VERSION / TYPE
CCRINEXN V2.4.2 UX  CDDIS               30-JUN-09 17:51     PGM / RUN BY / DATE
IGS BROADCAST EPHEMERIS FILE                                COMMENT
    0.1397D-07 -0.7451D-08 -0.5960D-07  0.1192D-06          ION ALPHA
    0.1085D+06 -0.3277D+05 -0.2621D+06  0.1966D+06          ION BETA
   -0.931322574615D-09-0.888178419700D-15   503808     1537 DELTA-UTC: A0,A1,T,W
    15                                                      LEAP SECONDS
                                                            END OF HEADER
";
        let header = parse(content).unwrap();
        assert_eq!(header.version, Version::new(2, 11));
        assert_eq!(header.constellation, Constellation::GPS);
        assert_eq!(header.program.as_deref(), Some("CCRINEXN V2.4.2 UX"));
        assert_eq!(header.run_by.as_deref(), Some("CDDIS"));
        assert_eq!(header.date.as_deref(), Some("30-JUN-09 17:51"));
        assert_eq!(header.comments, vec!["IGS BROADCAST EPHEMERIS FILE".to_string()]);
        assert_eq!(header.lines, 8);

        let kb = header.ionod_corrections.get(&Constellation::GPS).unwrap();
        assert_eq!(kb.alpha, (0.1397E-07, -0.7451E-08, -0.5960E-07, 0.1192E-06));
        assert_eq!(kb.beta, (0.1085E+06, -0.3277E+05, -0.2621E+06, 0.1966E+06));

        assert_eq!(
            header.time_corrections,
            vec![TimeSystemCorrection {
                kind: "GPUT".to_string(),
                a0: -0.931322574615E-09,
                a1: -0.888178419700E-15,
                t_ref: 503808.0,
                week: 1537,
            }]
        );
        assert_eq!(header.leap.map(|leap| leap.leap), Some(15));
    }
    #[test]
    fn rinex3_header() {
        let content = "     3.02           N: GNSS NAV DATA    J: QZSS             RINEX VERSION / TYPE
BCEmerge            congo               20210320 012902 GMT PGM / RUN BY / DATE
QZSA   1.1176E-08  2.9802E-08 -5.9605E-08 -1.1921E-07       IONOSPHERIC CORR
QZSB   8.1920E+04  9.8304E+04 -6.5536E+04 -5.2429E+05       IONOSPHERIC CORR
GAL    1.2500E+02  0.0000E+00  0.0000E+00  0.0000E+00       IONOSPHERIC CORR
QZUT -1.8626451492E-09-8.881784197E-16 503808 2149          TIME SYSTEM CORR
    18    18  2185     7GPS                                 LEAP SECONDS
                                                            END OF HEADER
";
        let header = parse(content).unwrap();
        assert_eq!(header.version, Version::new(3, 2));
        assert_eq!(header.constellation, Constellation::QZSS);
        assert_eq!(header.lines, 8);

        assert_eq!(header.ionod_corrections.len(), 1);
        let kb = header.ionod_corrections.get(&Constellation::QZSS).unwrap();
        assert_eq!(kb.alpha, (1.1176E-08, 2.9802E-08, -5.9605E-08, -1.1921E-07));
        assert_eq!(kb.beta, (8.1920E+04, 9.8304E+04, -6.5536E+04, -5.2429E+05));

        assert_eq!(header.time_corrections.len(), 1);
        assert_eq!(header.time_corrections[0].kind, "QZUT");
        assert_eq!(header.time_corrections[0].week, 2149);

        let leap = header.leap.unwrap();
        assert_eq!(leap.leap, 18);
        assert_eq!(leap.week, Some(2185));
        assert_eq!(leap.system, Some(Constellation::GPS));
    }
    #[test]
    fn body_follows_header() {
        let content = "     3.02           N: GNSS NAV DATA    G: GPS              RINEX VERSION / TYPE
                                                            END OF HEADER
G01 2021 03 19 00 00 00
";
        let mut reader = BufReader::new(content.as_bytes());
        let header = Header::parse(&mut reader).unwrap();
        assert_eq!(header.constellation, Constellation::GPS);
        assert_eq!(header.lines, 2);
        let mut next = String::new();
        reader.read_line(&mut next).unwrap();
        assert!(next.starts_with("G01 2021"));
    }
    #[test]
    fn unsupported_headers() {
        let v4 = "     4.00           N: GNSS NAV DATA    M: MIXED            RINEX VERSION / TYPE
                                                            END OF HEADER
";
        assert!(matches!(parse(v4), Err(ParsingError::UnsupportedFormat(_))));

        let v210 = "     2.10           N: GPS NAV DATA                         RINEX VERSION / TYPE
                                                            END OF HEADER
";
        assert!(matches!(parse(v210), Err(ParsingError::UnsupportedFormat(_))));

        let galileo = "     3.02           N: GNSS NAV DATA    E: GALILEO          RINEX VERSION / TYPE
                                                            END OF HEADER
";
        assert!(matches!(parse(galileo), Err(ParsingError::UnsupportedFormat(_))));

        let observation = "     2.11           O: GPS OBSERVATION DATA                 RINEX VERSION / TYPE
     2    C1    L1                                          # / TYPES OF OBSERV
                                                            END OF HEADER
";
        assert!(matches!(parse(observation), Err(ParsingError::NotNavigationData)));

        let no_delimiter = "     2.11           N: GPS NAV DATA                         RINEX VERSION / TYPE
";
        assert!(matches!(parse(no_delimiter), Err(ParsingError::MissingHeaderDelimiter)));

        let bad_version = "     x.yy           N: GPS NAV DATA                         RINEX VERSION / TYPE
                                                            END OF HEADER
";
        assert!(matches!(parse(bad_version), Err(ParsingError::VersionParsing(_))));
    }
}
