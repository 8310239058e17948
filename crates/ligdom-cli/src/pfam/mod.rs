//! The Pfam domain source: a document cache in front of the Pfam protein
//! XML service.

pub mod cache;
pub mod xml;

use crate::config::defaults::ACCESSION_PLACEHOLDER;
use crate::error::Result;
use cache::DocumentCache;
use ligdom::core::models::xref::CrossReference;
use ligdom::engine::annotation::{DomainDocument, DomainSource, DomainSourceError};
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PfamSettings {
    pub cache_directory: PathBuf,
    pub url_template: String,
    pub timeout: Duration,
    pub offline: bool,
}

impl PfamSettings {
    pub fn url_for(&self, accession: &str) -> String {
        self.url_template.replace(ACCESSION_PLACEHOLDER, accession)
    }
}

/// A [`DomainSource`] that serves cached Pfam documents and downloads the
/// missing ones.
///
/// `fetch` is synchronous and may be called from any non-async thread; HTTP
/// requests are driven to completion on the runtime behind `runtime`.
pub struct PfamClient {
    settings: PfamSettings,
    cache: DocumentCache,
    http: reqwest::Client,
    runtime: Handle,
}

impl PfamClient {
    pub fn new(settings: PfamSettings, runtime: Handle) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("ligdom/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let cache = DocumentCache::new(settings.cache_directory.clone());
        Ok(Self {
            settings,
            cache,
            http,
            runtime,
        })
    }

    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }

    async fn download(&self, accession: &str) -> reqwest::Result<String> {
        let url = self.settings.url_for(accession);
        info!(%url, "Downloading Pfam document.");
        self.http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }

    fn document_text(&self, structure_id: &str, xref: &CrossReference) -> std::result::Result<String, String> {
        if let Some(text) = self.cache.load(structure_id, xref).map_err(|e| e.to_string())? {
            return Ok(text);
        }
        if self.settings.offline {
            return Err("document is not cached and offline mode is enabled".to_string());
        }

        let text = self
            .runtime
            .block_on(self.download(&xref.accession))
            .map_err(|e| e.to_string())?;
        if let Err(e) = self.cache.store(structure_id, xref, &text) {
            warn!(error = %e, "Could not cache Pfam document.");
        }
        Ok(text)
    }
}

impl DomainSource for PfamClient {
    fn fetch(
        &self,
        structure_id: &str,
        xref: &CrossReference,
    ) -> std::result::Result<DomainDocument, DomainSourceError> {
        let text = self
            .document_text(structure_id, xref)
            .map_err(|reason| DomainSourceError::Unavailable {
                accession: xref.accession.clone(),
                reason,
            })?;

        let document =
            xml::parse_domain_document(&text).map_err(|e| DomainSourceError::Malformed {
                accession: xref.accession.clone(),
                reason: e.to_string(),
            })?;
        debug!(
            structure = structure_id,
            accession = %xref.accession,
            matches = document.hits.len(),
            "Parsed Pfam document."
        );
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const DOCUMENT: &str = r#"<pfam><matches><match accession="PF00042" id="Globin"><location start="27" end="136"/></match></matches></pfam>"#;

    fn settings(cache_directory: PathBuf, offline: bool) -> PfamSettings {
        PfamSettings {
            cache_directory,
            url_template: "http://127.0.0.1:9/protein?acc={accession}".to_string(),
            timeout: Duration::from_secs(1),
            offline,
        }
    }

    fn xref() -> CrossReference {
        CrossReference::new("A", "P69905", "HBA_HUMAN")
    }

    #[test]
    fn url_template_substitutes_accession() {
        let settings = settings(PathBuf::from("cache"), false);
        assert_eq!(settings.url_for("P69905"), "http://127.0.0.1:9/protein?acc=P69905");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn cached_document_is_served_without_network() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("1HEM_A_P69905.xml"), DOCUMENT).unwrap();
        let client = PfamClient::new(settings(dir.path().to_path_buf(), false), Handle::current()).unwrap();

        let document = tokio::task::spawn_blocking(move || client.fetch("1HEM", &xref()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(document.hits.len(), 1);
        assert_eq!(document.hits[0].id, "Globin");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn offline_cache_miss_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let client = PfamClient::new(settings(dir.path().to_path_buf(), true), Handle::current()).unwrap();

        let result = tokio::task::spawn_blocking(move || client.fetch("1HEM", &xref()))
            .await
            .unwrap();

        assert!(matches!(
            result,
            Err(DomainSourceError::Unavailable { accession, .. }) if accession == "P69905"
        ));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn corrupt_cached_document_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("1HEM_A_P69905.xml"), "<pfam><match id=\"x\">").unwrap();
        let client = PfamClient::new(settings(dir.path().to_path_buf(), true), Handle::current()).unwrap();

        let result = tokio::task::spawn_blocking(move || client.fetch("1HEM", &xref()))
            .await
            .unwrap();

        assert!(matches!(result, Err(DomainSourceError::Malformed { .. })));
    }
}
