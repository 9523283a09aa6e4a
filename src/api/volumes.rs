//! Volume (namespace directory) operations.

use reqwest::Method;
use tracing::info;

use super::client::{ApiClient, NO_BODY};
use crate::error::{IsilonError, Result};
use crate::model::volume::{AclRequest, Volume, VolumeAttributes, VolumeList};

const TARGET_TYPE_HEADER: &str = "x-isi-ifs-target-type";
const ACCESS_CONTROL_HEADER: &str = "x-isi-ifs-access-control";
const COPY_SOURCE_HEADER: &str = "x-isi-ifs-copy-source";

fn require_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(IsilonError::InvalidArgument("no volume name set".to_string()));
    }
    Ok(())
}

impl ApiClient {
    /// List the directories directly under the volumes path.
    pub async fn get_volumes(&self) -> Result<Vec<Volume>> {
        let list: Option<VolumeList> = self
            .query(Method::GET, self.namespace_path(), None, &[], NO_BODY)
            .await?;
        Ok(list.map(|l| l.children).unwrap_or_default())
    }

    /// Create a volume directory and hand it to the configured user and group.
    pub async fn create_volume(&self, name: &str) -> Result<()> {
        require_name(name)?;

        self.execute(
            Method::PUT,
            self.namespace_path(),
            Some(name),
            &[],
            &[
                (TARGET_TYPE_HEADER, "container"),
                (ACCESS_CONTROL_HEADER, "public_read_write"),
            ],
            NO_BODY,
        )
        .await?;

        let acl = AclRequest::ownership(self.username(), self.group());
        self.execute(
            Method::PUT,
            self.namespace_path(),
            Some(name),
            &[("acl", "")],
            &[],
            Some(&acl),
        )
        .await?;

        info!(volume = name, "created volume");
        Ok(())
    }

    /// Fetch a volume's namespace metadata.
    pub async fn get_volume(&self, name: &str) -> Result<Volume> {
        require_name(name)?;

        let attrs: Option<VolumeAttributes> = self
            .query(
                Method::GET,
                self.namespace_path(),
                Some(name),
                &[("metadata", "")],
                NO_BODY,
            )
            .await?;

        Ok(Volume {
            name: name.to_string(),
            attributes: attrs.map(|a| a.attrs).unwrap_or_default(),
        })
    }

    /// Remove a volume and everything below it.
    pub async fn delete_volume(&self, name: &str) -> Result<()> {
        require_name(name)?;

        self.execute(
            Method::DELETE,
            self.namespace_path(),
            Some(name),
            &[("recursive", "true")],
            &[],
            NO_BODY,
        )
        .await?;

        info!(volume = name, "deleted volume");
        Ok(())
    }

    /// Create `destination` as a server-side copy of `source`.
    pub async fn copy_volume(&self, source: &str, destination: &str) -> Result<()> {
        require_name(source)?;
        require_name(destination)?;

        let copy_source = format!("/{}/{}", self.namespace_path(), source);
        self.execute(
            Method::PUT,
            self.namespace_path(),
            Some(destination),
            &[],
            &[(COPY_SOURCE_HEADER, copy_source.as_str())],
            NO_BODY,
        )
        .await?;

        info!(source, destination, "copied volume");
        Ok(())
    }
}
