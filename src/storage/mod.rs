//! Reading and writing trained artifacts.
//!
//! Files ending in `.json` hold tagged JSON; anything else is the binary
//! container described in [`format`].

mod artifact;
pub mod format;

pub use artifact::{Artifact, ClassifierArtifact, SelectorArtifact, VectorizerArtifact};
pub use format::{ArtifactHeader, ArtifactKind, Encoding};

use crate::error::{Result, SpamSiftError};
use crate::model::{Classifier, FeatureSelector, Vectorizer};
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Reads an artifact, choosing the encoding from the file extension.
pub fn read_artifact<A: Artifact, P: AsRef<Path>>(path: P) -> Result<A> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;

    let artifact = match Encoding::for_path(path) {
        Encoding::Json => serde_json::from_slice(&bytes)?,
        Encoding::Binary => {
            let header = ArtifactHeader::from_bytes(&bytes)?;
            A::decode_payload(header.kind, &bytes[format::HEADER_SIZE..])?
        }
    };
    debug!("Read {} artifact from {}", A::ROLE, path.display());
    Ok(artifact)
}

/// Writes an artifact, choosing the encoding from the file extension.
pub fn write_artifact<A: Artifact, P: AsRef<Path>>(path: P, artifact: &A) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    match Encoding::for_path(path) {
        Encoding::Json => serde_json::to_writer_pretty(&mut writer, artifact)?,
        Encoding::Binary => {
            writer.write_all(&ArtifactHeader::new(artifact.kind()).to_bytes())?;
            writer.write_all(&artifact.encode_payload()?)?;
        }
    }
    writer.flush()?;
    debug!("Wrote {} artifact to {}", A::ROLE, path.display());
    Ok(())
}

/// Loads the vectorizer at `path`.
///
/// Any failure is reported as `AssetUnavailable` for that path.
pub fn load_vectorizer<P: AsRef<Path>>(path: P) -> Result<Box<dyn Vectorizer>> {
    let path = path.as_ref();
    read_artifact::<VectorizerArtifact, _>(path)
        .and_then(VectorizerArtifact::into_vectorizer)
        .map_err(|e| as_unavailable(path, e))
}

/// Loads the feature selector at `path`.
pub fn load_selector<P: AsRef<Path>>(path: P) -> Result<Box<dyn FeatureSelector>> {
    let path = path.as_ref();
    read_artifact::<SelectorArtifact, _>(path)
        .and_then(SelectorArtifact::into_selector)
        .map_err(|e| as_unavailable(path, e))
}

/// Loads the classifier at `path`.
pub fn load_classifier<P: AsRef<Path>>(path: P) -> Result<Box<dyn Classifier>> {
    let path = path.as_ref();
    read_artifact::<ClassifierArtifact, _>(path)
        .and_then(ClassifierArtifact::into_classifier)
        .map_err(|e| as_unavailable(path, e))
}

fn as_unavailable(path: &Path, err: SpamSiftError) -> SpamSiftError {
    match err {
        err @ SpamSiftError::AssetUnavailable { .. } => err,
        other => SpamSiftError::asset_unavailable(path, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CountVectorizer, FeatureVector, MultinomialNb, SupportSelector};
    use tempfile::tempdir;

    fn classifier() -> ClassifierArtifact {
        ClassifierArtifact::MultinomialNb(
            MultinomialNb::new(
                vec![0, 1],
                vec![-0.2, -1.7],
                vec![vec![-0.1, -2.3], vec![-2.3, -0.1]],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_json_artifacts() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vectorizer.json");
        let vectorizer = CountVectorizer::from_terms(["claim", "prize"]).unwrap();
        write_artifact(&path, &VectorizerArtifact::from(&vectorizer)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"kind\": \"count\""));

        let loaded = load_vectorizer(&path).unwrap();
        assert_eq!(loaded.n_features(), 2);
        assert_eq!(loaded.transform("claim claim").unwrap().get(0), 2.0);
    }

    #[test]
    fn test_binary_artifacts() {
        let dir = tempdir().unwrap();

        let sel_path = dir.path().join("selector.bin");
        let selector = SelectorArtifact::Support(SupportSelector::new(3, vec![0, 2]).unwrap());
        write_artifact(&sel_path, &selector).unwrap();
        let bytes = std::fs::read(&sel_path).unwrap();
        assert_eq!(&bytes[0..4], b"SSFT");
        assert_eq!(read_artifact::<SelectorArtifact, _>(&sel_path).unwrap(), selector);

        let clf_path = dir.path().join("classifier.bin");
        write_artifact(&clf_path, &classifier()).unwrap();
        let loaded = load_classifier(&clf_path).unwrap();
        assert_eq!(loaded.kind(), "multinomial_nb");
        let spam = FeatureVector::from_entries(2, vec![(1, 3.0)]).unwrap();
        assert_eq!(loaded.predict(&spam).unwrap(), 1);
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.json");
        match load_selector(&path) {
            Err(SpamSiftError::AssetUnavailable { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected AssetUnavailable, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_corrupt_files_are_unavailable() {
        let dir = tempdir().unwrap();

        let json = dir.path().join("classifier.json");
        std::fs::write(&json, "{\"kind\":\"forest\"}").unwrap();
        assert!(matches!(load_classifier(&json), Err(SpamSiftError::AssetUnavailable { .. })));

        let bin = dir.path().join("classifier.bin");
        std::fs::write(&bin, b"JUNKJUNKJUNK").unwrap();
        assert!(matches!(load_classifier(&bin), Err(SpamSiftError::AssetUnavailable { .. })));
    }

    #[test]
    fn test_binary_kind_mismatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.bin");
        write_artifact(&path, &classifier()).unwrap();
        let err = load_selector(&path).err().unwrap();
        assert!(err.to_string().contains("expected a selector artifact"));
    }
}
