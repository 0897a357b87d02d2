use std::fs;
use std::path::Path;

use anvaya_protocol::Vocabulary;
use anyhow::{anyhow, Context, Result};
use rkyv::ser::{serializers::AllocSerializer, Serializer};
use rkyv::{AlignedVec, Deserialize};
use tracing::{debug, info};

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// Reads a vocabulary from JSON or from a compiled archive.
pub fn load_vocabulary(path: &Path) -> Result<Vocabulary> {
    let bytes = fs::read(path).with_context(|| format!("failed to read vocabulary {}", path.display()))?;

    let vocab = if is_json(path) {
        serde_json::from_slice(&bytes)
            .with_context(|| format!("invalid vocabulary JSON in {}", path.display()))?
    } else {
        decode_archive(&bytes).with_context(|| format!("invalid vocabulary archive {}", path.display()))?
    };

    debug!(path = %path.display(), version = vocab.version, "vocabulary loaded");
    Ok(vocab)
}

pub fn encode_archive(vocab: &Vocabulary) -> Result<AlignedVec> {
    let mut serializer = AllocSerializer::<4096>::default();
    serializer
        .serialize_value(vocab)
        .map_err(|e| anyhow!("failed to serialize vocabulary: {e:?}"))?;
    Ok(serializer.into_serializer().into_inner())
}

pub fn decode_archive(bytes: &[u8]) -> Result<Vocabulary> {
    // Archives must be read from aligned memory
    let mut aligned = AlignedVec::with_capacity(bytes.len());
    aligned.extend_from_slice(bytes);

    let archived = rkyv::check_archived_root::<Vocabulary>(&aligned)
        .map_err(|e| anyhow!("archive failed validation: {e}"))?;
    archived
        .deserialize(&mut rkyv::Infallible)
        .map_err(|_| anyhow!("failed to deserialize vocabulary"))
}

/// JSON vocabulary in, rkyv archive out.
pub fn compile_vocabulary(input: &Path, output: &Path) -> Result<()> {
    info!(input = %input.display(), "reading vocabulary JSON");
    let text = fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))?;
    let vocab: Vocabulary = serde_json::from_str(&text)
        .with_context(|| format!("invalid vocabulary JSON in {}", input.display()))?;

    info!(
        version = vocab.version,
        colors = vocab.colors.len(),
        requirements = vocab.requirements.len(),
        "compiling vocabulary"
    );
    let bytes = encode_archive(&vocab)?;

    fs::write(output, bytes.as_slice()).with_context(|| format!("failed to write {}", output.display()))?;
    info!(output = %output.display(), bytes = bytes.len(), "vocabulary archive written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_round_trip() {
        let vocab = Vocabulary::sanskrit_default();
        let bytes = encode_archive(&vocab).unwrap();
        assert_eq!(decode_archive(&bytes).unwrap(), vocab);
    }

    #[test]
    fn test_garbage_archive_rejected() {
        assert!(decode_archive(&[1, 2, 3]).is_err());
    }

    #[test]
    fn test_compile_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("vocab.json");
        let archive = dir.path().join("vocab.rkyv");

        let mut vocab = Vocabulary::sanskrit_default();
        vocab.version = 7;
        fs::write(&json, serde_json::to_string_pretty(&vocab).unwrap()).unwrap();

        compile_vocabulary(&json, &archive).unwrap();

        assert_eq!(load_vocabulary(&archive).unwrap(), vocab);
        assert_eq!(load_vocabulary(&json).unwrap(), vocab);
    }
}
