use std::io::Write;

use flate2::{Compression, write::GzEncoder};

/// Gzip the bundled output to measure its compressed size.
pub fn gzip_bytes(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    encoder.finish()
}

pub fn gzip_len(bytes: &[u8]) -> std::io::Result<usize> {
    Ok(gzip_bytes(bytes)?.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gzip_output_has_gzip_magic() {
        let zipped = gzip_bytes(b"console.log(1);").unwrap();
        assert_eq!(&zipped[..2], &[0x1f, 0x8b]);
    }

    #[test]
    fn test_gzip_compresses_repetitive_input() {
        let input = "var x = 1;".repeat(1000);
        let len = gzip_len(input.as_bytes()).unwrap();
        assert!(len > 0);
        assert!(len < input.len());
    }
}
