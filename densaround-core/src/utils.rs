use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::consts::{GZIP_MAGIC, STDIN_PATH};
use crate::errors::DensityError;

///
/// Wrap a raw stream in a buffered reader, inserting a gzip decoder when the
/// stream starts with the gzip magic bytes.
///
pub fn get_decompressing_reader(inner: Box<dyn Read>) -> Result<BufReader<Box<dyn Read>>, DensityError> {
    let mut peek = BufReader::new(inner);
    let is_gzipped = peek.fill_buf()?.starts_with(&GZIP_MAGIC);

    let reader: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(peek)),
        false => Box::new(peek),
    };

    Ok(BufReader::new(reader))
}

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// Compression is detected from the file contents, not the extension.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>, DensityError> {
    let file = File::open(path).map_err(|source| DensityError::FileOpen {
        path: path.display().to_string(),
        source,
    })?;

    get_decompressing_reader(Box::new(file))
}

/// Get a reader for either a gzipped, non-gzipped file, or stdin
///
/// # Arguments
///
/// - file_path: path to the file to read, or '-' for stdin
///
/// # Returns
///
/// A `BufReader` object for a given file path or stdin.
pub fn get_dynamic_reader_w_stdin(file_path_str: &str) -> Result<BufReader<Box<dyn Read>>, DensityError> {
    if is_stdin(file_path_str) {
        get_decompressing_reader(Box::new(std::io::stdin()))
    } else {
        get_dynamic_reader(Path::new(file_path_str))
    }
}

pub fn is_stdin(file_path_str: &str) -> bool {
    file_path_str == STDIN_PATH
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_plain_file_is_read_verbatim() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("events.csv");
        std::fs::write(&path, "1,2\n3,4\n").unwrap();

        let mut contents = String::new();
        get_dynamic_reader(&path)
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "1,2\n3,4\n");
    }

    #[rstest]
    fn test_gzip_is_detected_without_extension() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("events.csv");

        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(b"10,20\n").unwrap();
        encoder.finish().unwrap();

        let mut contents = String::new();
        get_dynamic_reader(&path)
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "10,20\n");
    }

    #[rstest]
    fn test_missing_file_names_the_path() {
        let Err(err) = get_dynamic_reader(Path::new("does/not/exist.csv")) else {
            panic!("missing file opened");
        };
        assert!(err.to_string().contains("does/not/exist.csv"));
    }

    #[rstest]
    fn test_empty_stream_is_not_an_error() {
        let reader = get_decompressing_reader(Box::new(std::io::empty())).unwrap();
        assert_eq!(reader.lines().count(), 0);
    }
}
