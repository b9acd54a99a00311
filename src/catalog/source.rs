use super::*;
use anyhow::Context;

impl Catalog {
    /// Loads the catalog once at startup.
    ///
    /// An `http://` or `https://` source is fetched; anything else is read as
    /// a local JSON file holding the same array of card descriptors.
    pub async fn load(source: &str) -> anyhow::Result<Self> {
        log::info!("loading catalog from {}", source);
        let cards = if source.starts_with("http://") || source.starts_with("https://") {
            Self::fetch(source).await?
        } else {
            Self::read(source).await?
        };
        let catalog = Self::from(cards);
        anyhow::ensure!(
            !catalog.eligible().is_empty(),
            "catalog at {} has no drawable cards",
            source
        );
        Ok(catalog).inspect(|c: &Self| {
            log::info!(
                "loaded {} cards ({} drawable)",
                c.len(),
                c.eligible().len()
            )
        })
    }

    async fn fetch(url: &str) -> anyhow::Result<Vec<Card>> {
        reqwest::get(url)
            .await
            .with_context(|| format!("fetching catalog from {}", url))?
            .error_for_status()
            .with_context(|| format!("catalog source {} refused", url))?
            .json::<Vec<Card>>()
            .await
            .context("decoding catalog")
    }

    async fn read(path: &str) -> anyhow::Result<Vec<Card>> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("reading catalog file {}", path))?;
        serde_json::from_slice::<Vec<Card>>(&bytes).context("decoding catalog")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_local_file() {
        let path = std::env::temp_dir().join(format!("catalog-{}.json", std::process::id()));
        let json = r#"[
            {"id": 1, "name": "Egg", "rarity": 1, "monster_points": 100, "jp_only": false},
            {"id": 2, "name": "Oni", "rarity": 6, "monster_points": 4000, "jp_only": true}
        ]"#;
        tokio::fs::write(&path, json).await.unwrap();
        let catalog = Catalog::load(path.to_str().unwrap()).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.eligible(), &[1]);
    }

    #[tokio::test]
    async fn rejects_catalog_without_drawable_cards() {
        let path = std::env::temp_dir().join(format!("restricted-{}.json", std::process::id()));
        let json = r#"[{"id": 2, "name": "Oni", "jp_only": true}]"#;
        tokio::fs::write(&path, json).await.unwrap();
        let result = Catalog::load(path.to_str().unwrap()).await;
        tokio::fs::remove_file(&path).await.unwrap();
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn missing_file_is_fatal() {
        assert!(Catalog::load("/nonexistent/catalog.json").await.is_err());
    }
}
