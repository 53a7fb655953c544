//! Delimited-file loading with encoding and delimiter auto-detection.
//!
//! The loader is the only component that performs I/O. It reads the whole
//! file into memory, picks the first candidate encoding that decodes a
//! fixed-size sample cleanly, counts delimiter candidates in that sample,
//! and parses records into a [`Dataset`] keyed by the first record's names.

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use encoding_rs::{EUC_KR, Encoding, SHIFT_JIS, UTF_8, WINDOWS_1252};

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::Dataset;

use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};

/// Delimiter candidates, tested in order; ties favor the earlier entry, so
/// detection is comma-biased.
const DELIMITER_CANDIDATES: [u8; 4] = [b',', b'\t', b';', b'|'];

/// Fallback encodings tried after the preferred one, in order.
static FALLBACK_ENCODINGS: [&Encoding; 4] = [UTF_8, EUC_KR, SHIFT_JIS, WINDOWS_1252];

/// Options controlling load behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// Encoding tried before the fixed fallback list.
    pub preferred_encoding: Option<&'static Encoding>,
    /// If `None`, auto-detect the delimiter from the sample.
    pub delimiter: Option<u8>,
    /// Number of bytes inspected for encoding/delimiter detection.
    pub sample_len: usize,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field(
                "preferred_encoding",
                &self.preferred_encoding.map(|e| e.name()),
            )
            .field("delimiter", &self.delimiter)
            .field("sample_len", &self.sample_len)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            preferred_encoding: None,
            delimiter: None,
            sample_len: 4096,
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Load a delimited file into an in-memory [`Dataset`].
///
/// - Encoding: the preferred encoding (if set) is tried first, then UTF-8,
///   EUC-KR, Shift_JIS, and Windows-1252; the first that decodes the sample
///   without errors wins. Fails with [`AnalysisError::Encoding`] if none do.
/// - Delimiter: the most frequent of `,` `\t` `;` `|` within the sample,
///   unless forced via [`LoadOptions::delimiter`].
/// - The first record supplies column names (duplicates dropped, first
///   occurrence wins). Short rows are padded with empty cells; extra cells
///   on long rows are discarded.
///
/// When an observer is configured, this function reports `on_success` with
/// row/column stats, `on_failure` with a computed severity, and `on_alert`
/// when that severity is >= [`LoadOptions::alert_at_or_above`].
///
/// # Examples
///
/// ```no_run
/// use rust_data_analysis::ingestion::{load_from_path, LoadOptions};
///
/// # fn main() -> Result<(), rust_data_analysis::AnalysisError> {
/// let ds = load_from_path("data.csv", &LoadOptions::default())?;
/// println!("rows={} columns={}", ds.row_count(), ds.column_count());
/// # Ok(())
/// # }
/// ```
pub fn load_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> AnalysisResult<Dataset> {
    let path = path.as_ref();
    let ctx = LoadContext {
        path: path.to_path_buf(),
    };

    let result = load_inner(path, options);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok((ds, encoding, delimiter)) => obs.on_success(
                &ctx,
                LoadStats {
                    rows: ds.row_count(),
                    columns: ds.column_count(),
                    encoding: encoding.name(),
                    delimiter: *delimiter,
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result.map(|(ds, _, _)| ds)
}

/// Load a delimited file from an in-memory byte buffer.
///
/// Applies the same encoding/delimiter detection as [`load_from_path`];
/// [`AnalysisError::Encoding`] carries an empty path in this case.
pub fn load_from_bytes(bytes: &[u8], options: &LoadOptions) -> AnalysisResult<Dataset> {
    decode_and_parse(bytes, options, Path::new("")).map(|(ds, _, _)| ds)
}

fn load_inner(
    path: &Path,
    options: &LoadOptions,
) -> AnalysisResult<(Dataset, &'static Encoding, u8)> {
    let bytes = fs::read(path)?;
    decode_and_parse(&bytes, options, path)
}

fn decode_and_parse(
    bytes: &[u8],
    options: &LoadOptions,
    path: &Path,
) -> AnalysisResult<(Dataset, &'static Encoding, u8)> {
    let sample = &bytes[..bytes.len().min(options.sample_len)];

    let encoding = detect_encoding(options.preferred_encoding, sample).ok_or_else(|| {
        AnalysisError::Encoding {
            path: path.to_path_buf(),
        }
    })?;

    // BOM-aware full decode; bytes past the sample that fail to decode
    // become replacement characters rather than load failures.
    let (decoded, _, _) = encoding.decode(bytes);

    let delimiter = match options.delimiter {
        Some(d) => d,
        None => detect_delimiter(sample_text(&decoded, options.sample_len)),
    };

    let dataset = parse_records(&decoded, delimiter)?;
    Ok((dataset, encoding, delimiter))
}

/// First candidate encoding that decodes the sample without errors.
///
/// Up to 3 trailing bytes are allowed to be an incomplete multi-byte
/// sequence, since the sample may cut a character at its boundary.
fn detect_encoding(
    preferred: Option<&'static Encoding>,
    sample: &[u8],
) -> Option<&'static Encoding> {
    preferred
        .into_iter()
        .chain(FALLBACK_ENCODINGS)
        .find(|&enc| sample_decodes_cleanly(enc, sample))
}

fn sample_decodes_cleanly(encoding: &'static Encoding, sample: &[u8]) -> bool {
    for trim in 0..=3.min(sample.len()) {
        let (_, had_errors) = encoding.decode_without_bom_handling(&sample[..sample.len() - trim]);
        if !had_errors {
            return true;
        }
    }
    false
}

/// Most frequent delimiter candidate within the sample text.
///
/// Ties keep the earlier candidate, so an all-text single-column file falls
/// back to comma.
fn detect_delimiter(sample: &str) -> u8 {
    let mut best = DELIMITER_CANDIDATES[0];
    let mut best_count = count_char(sample, best);
    for &candidate in &DELIMITER_CANDIDATES[1..] {
        let count = count_char(sample, candidate);
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

fn count_char(text: &str, byte: u8) -> usize {
    text.bytes().filter(|&b| b == byte).count()
}

/// Decoded text clipped to roughly the sample window, on a char boundary.
fn sample_text(decoded: &str, sample_len: usize) -> &str {
    if decoded.len() <= sample_len {
        return decoded;
    }
    let mut end = sample_len;
    while !decoded.is_char_boundary(end) {
        end -= 1;
    }
    &decoded[..end]
}

fn parse_records(decoded: &str, delimiter: u8) -> AnalysisResult<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(decoded.as_bytes());

    let headers = rdr.headers()?.clone();

    // Unique column names in first-seen order; later duplicates (and their
    // cells) are dropped.
    let mut columns: Vec<String> = Vec::with_capacity(headers.len());
    let mut kept_idxs: Vec<usize> = Vec::with_capacity(headers.len());
    for (idx, name) in headers.iter().enumerate() {
        if !columns.iter().any(|c| c == name) {
            columns.push(name.to_string());
            kept_idxs.push(idx);
        }
    }

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let row = kept_idxs
            .iter()
            .map(|&idx| record.get(idx).unwrap_or("").to_string())
            .collect();
        rows.push(row);
    }

    Ok(Dataset::new(columns, rows))
}

fn severity_for_error(e: &AnalysisError) -> LoadSeverity {
    match e {
        AnalysisError::Io(_) | AnalysisError::Encoding { .. } => LoadSeverity::Critical,
        AnalysisError::Csv(err) => match err.kind() {
            csv::ErrorKind::Io(_) => LoadSeverity::Critical,
            _ => LoadSeverity::Error,
        },
        _ => LoadSeverity::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::{LoadOptions, detect_delimiter, detect_encoding, load_from_bytes};
    use encoding_rs::{EUC_KR, UTF_8, WINDOWS_1252};

    #[test]
    fn detect_delimiter_picks_most_frequent() {
        assert_eq!(detect_delimiter("a\tb\tc\nx\ty\tz\n"), b'\t');
        assert_eq!(detect_delimiter("a;b;c\n1;2;3\n"), b';');
        assert_eq!(detect_delimiter("a|b|c\n1|2|3\n"), b'|');
    }

    #[test]
    fn detect_delimiter_tie_favors_comma() {
        // One comma, one semicolon: earlier candidate wins.
        assert_eq!(detect_delimiter("a,b\nc;d\n"), b',');
        // No delimiter at all: comma fallback.
        assert_eq!(detect_delimiter("plain text"), b',');
    }

    #[test]
    fn detect_encoding_prefers_utf8_for_valid_utf8() {
        assert_eq!(detect_encoding(None, "name,city\n".as_bytes()), Some(UTF_8));
    }

    #[test]
    fn detect_encoding_falls_back_for_legacy_bytes() {
        let (bytes, _, _) = EUC_KR.encode("이름,도시\n");
        let found = detect_encoding(None, &bytes).unwrap();
        assert_eq!(found, EUC_KR);
    }

    #[test]
    fn detect_encoding_tolerates_sample_cut_mid_char() {
        let full = "id,note\n1,café".as_bytes();
        // Cut inside the 2-byte 'é' sequence.
        let cut = &full[..full.len() - 1];
        assert_eq!(detect_encoding(None, cut), Some(UTF_8));
    }

    #[test]
    fn windows_1252_is_the_terminal_fallback() {
        // 0xFF alone is invalid UTF-8 and invalid EUC-KR/Shift_JIS lead byte
        // placement, but Windows-1252 maps every byte.
        let bytes = b"a,b\n\xFF,2\n";
        assert_eq!(detect_encoding(None, bytes), Some(WINDOWS_1252));
    }

    #[test]
    fn load_from_bytes_parses_header_and_rows() {
        let ds = load_from_bytes(b"name,age\nAda,36\nGrace,45\n", &LoadOptions::default()).unwrap();
        assert_eq!(ds.columns, vec!["name", "age"]);
        assert_eq!(ds.rows.len(), 2);
        assert_eq!(ds.rows[0], vec!["Ada".to_string(), "36".to_string()]);
    }

    #[test]
    fn load_from_bytes_pads_short_rows_and_drops_extras() {
        let ds = load_from_bytes(b"a,b,c\n1,2\n1,2,3,4\n", &LoadOptions::default()).unwrap();
        assert_eq!(
            ds.rows[0],
            vec!["1".to_string(), "2".to_string(), String::new()]
        );
        assert_eq!(
            ds.rows[1],
            vec!["1".to_string(), "2".to_string(), "3".to_string()]
        );
    }

    #[test]
    fn load_from_bytes_drops_duplicate_header_names() {
        let ds = load_from_bytes(b"id,name,id\n1,Ada,9\n", &LoadOptions::default()).unwrap();
        assert_eq!(ds.columns, vec!["id", "name"]);
        assert_eq!(ds.rows[0], vec!["1".to_string(), "Ada".to_string()]);
    }

    #[test]
    fn forced_delimiter_overrides_detection() {
        let opts = LoadOptions {
            delimiter: Some(b';'),
            ..Default::default()
        };
        // Commas outnumber semicolons, but the forced delimiter wins.
        let ds = load_from_bytes(b"a;b\n1,2,3;4\n", &opts).unwrap();
        assert_eq!(ds.columns, vec!["a", "b"]);
        assert_eq!(ds.rows[0], vec!["1,2,3".to_string(), "4".to_string()]);
    }

    #[test]
    fn quoted_delimiters_skew_detection_known_boundary() {
        // Sample-frequency detection counts delimiters inside quotes too;
        // semicolons win here even though the file is comma-delimited.
        let input = b"a,b\n\"x;y;z;w\",2\n";
        assert_eq!(detect_delimiter(core::str::from_utf8(input).unwrap()), b';');
    }
}
