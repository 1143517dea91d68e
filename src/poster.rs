// Neko poster.
// Fetches an image, publishes it to the instance and sweeps the image directory.

use std::future::Future;
use std::path::{Path, PathBuf};

use reqwest::StatusCode;
use tracing::instrument::WithSubscriber;
use tracing::subscriber::NoSubscriber;
use tracing::{Dispatch, debug, error, info};

use crate::cache::{self, CacheSweeper, SweepOutcome};
use crate::config::Config;
use crate::error::{NekoError, Result, Step, StepExt};
use crate::fedi::{FediClient, Visibility};
use crate::id::RemoteId;
use crate::nekos::{Category, NekosClient};

/// A successfully published image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    /// Local copy of the image.
    pub image: PathBuf,
    /// Id of the uploaded media on the instance.
    pub media_id: RemoteId,
    /// Status code of the status creation request.
    pub status: StatusCode,
}

/// Posts neko images to one instance. Owns the sweep counter, so keep one
/// poster per image directory for the lifetime of the process.
pub struct NekoPoster {
    config: Config,
    nekos: NekosClient,
    fedi: FediClient,
    sweeper: CacheSweeper,
    /// Set when `log_task` is off; every operation runs under it.
    silence: Option<Dispatch>,
}

impl NekoPoster {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let nekos = NekosClient::new(config.sources.clone())?;
        let fedi = FediClient::new(&config.instance, &config.token)?;
        let silence = (!config.log_task).then(|| Dispatch::new(NoSubscriber::default()));

        Ok(Self {
            config,
            nekos,
            fedi,
            sweeper: CacheSweeper::new(),
            silence,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sweeper(&self) -> &CacheSweeper {
        &self.sweeper
    }

    /// Ensure the image directory exists. Failures are only logged.
    pub fn create_img_dir(&self) {
        with_logging(self.silence.as_ref(), || self.ensure_img_dir());
    }

    /// Download an image of `category` into the image directory.
    ///
    /// Unknown categories fail with [`NekoError::UnknownCategory`]; every
    /// other failure is tagged [`Step::Fetch`].
    pub async fn fetch_image(&self, category: &str) -> Result<PathBuf> {
        self.logged(self.fetch(category)).await
    }

    /// Upload the image at `path` and post a status with it attached.
    pub async fn publish(&self, path: &Path, visibility: Visibility) -> Result<Published> {
        self.logged(self.upload_and_post(path, visibility)).await
    }

    /// Fetch and publish one image, reporting which step failed.
    pub async fn try_post_neko(&self, category: &str, visibility: Visibility) -> Result<Published> {
        self.logged(self.fetch_and_publish(category, visibility)).await
    }

    /// Fetch and publish one image.
    ///
    /// Only an unknown category is returned as an error. Any other failure is
    /// logged and swallowed: nothing is retried and an already uploaded media
    /// item stays on the instance.
    pub async fn post_neko(&self, category: &str, visibility: Visibility) -> Result<()> {
        self.logged(async {
            match self.fetch_and_publish(category, visibility).await {
                Ok(_) => Ok(()),
                Err(e @ NekoError::UnknownCategory(_)) => Err(e),
                Err(e) => {
                    error!(category, error = %e, "Posting failed");
                    Ok(())
                }
            }
        })
        .await
    }

    /// Advance the sweep counter, wiping the image directory every 11th call.
    pub fn clean_cache(&mut self) -> SweepOutcome {
        let dir = &self.config.image_dir;
        let sweeper = &mut self.sweeper;
        with_logging(self.silence.as_ref(), || sweeper.sweep(dir))
    }

    /// Run `fut` under the silencing dispatcher when logging is off.
    async fn logged<F: Future>(&self, fut: F) -> F::Output {
        match &self.silence {
            Some(dispatch) => fut.with_subscriber(dispatch.clone()).await,
            None => fut.await,
        }
    }

    fn ensure_img_dir(&self) {
        if let Err(e) = cache::ensure_dir(&self.config.image_dir) {
            debug!(
                dir = %self.config.image_dir.display(),
                error = %e,
                "Cannot create image directory"
            );
        }
    }

    async fn fetch(&self, category: &str) -> Result<PathBuf> {
        info!(category, "Downloading image...");
        let category: Category = category.parse()?;
        self.download(category).await.during(Step::Fetch)
    }

    async fn download(&self, category: Category) -> Result<PathBuf> {
        let (name, url) = if category.is_random() {
            let response = self.nekos.fetch_random().await?;
            let name = cache::random_file_name(&response.data.id)?;
            (name, response.data.attributes.file)
        } else {
            let response = self.nekos.fetch_category(category).await?;
            let url = response.first_url()?.to_string();
            (cache::category_file_name(category, &url)?, url)
        };

        let bytes = self.nekos.download(&url).await?;

        self.ensure_img_dir();
        let path = cache::image_path(&self.config.image_dir, &name);
        cache::write_image(&path, &bytes)?;

        info!(path = %path.display(), "Download was successful");
        Ok(path)
    }

    async fn upload_and_post(&self, path: &Path, visibility: Visibility) -> Result<Published> {
        let bytes = cache::read_image(path).during(Step::Upload)?;
        let name = cache::display_name(path).during(Step::Upload)?;

        info!(name = %name, %visibility, "Posting image...");
        let media = self
            .fedi
            .upload_media(&name, bytes)
            .await
            .during(Step::Upload)?;

        let status = self
            .fedi
            .post_status(&self.config.status_message, visibility, &media.id)
            .await
            .during(Step::Status)?;

        info!(
            media_id = %media.id,
            status = status.as_u16(),
            "Post was successful"
        );
        Ok(Published {
            image: path.to_path_buf(),
            media_id: media.id,
            status,
        })
    }

    async fn fetch_and_publish(&self, category: &str, visibility: Visibility) -> Result<Published> {
        let path = self.fetch(category).await?;
        self.upload_and_post(&path, visibility).await
    }
}

/// Run `f` under `silence` if it is set.
fn with_logging<T>(silence: Option<&Dispatch>, f: impl FnOnce() -> T) -> T {
    match silence {
        Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
        None => f(),
    }
}
