//! Checksum calculation for uploaded order files.

use sha2::{Digest, Sha256};

/// Calculate SHA-256 checksum of uploaded content.
///
/// # Arguments
/// * `content` - Raw bytes of the uploaded file
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn calculate_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    let result = hasher.finalize();
    hex::encode(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_consistency() {
        let content = "打包操作人,商品数量\n张三,2\n".as_bytes();
        assert_eq!(calculate_checksum(content), calculate_checksum(content));
    }

    #[test]
    fn test_different_content_different_checksum() {
        assert_ne!(calculate_checksum(b"Qty\n1\n"), calculate_checksum(b"Qty\n2\n"));
    }

    #[test]
    fn test_known_digest() {
        assert_eq!(
            calculate_checksum(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
