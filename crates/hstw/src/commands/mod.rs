//! CLI command implementations.

pub(crate) mod convert;
pub(crate) mod delete;
pub(crate) mod linkcheck;
pub(crate) mod upload;

pub(crate) use convert::ConvertArgs;
pub(crate) use delete::DeleteCommand;
pub(crate) use linkcheck::LinkcheckArgs;
pub(crate) use upload::UploadArgs;

use std::path::Path;

use hstw_config::{CliSettings, Config};
use hstw_hubspot::{HubSpotAdapter, HubSpotClient};

use crate::error::CliError;

/// Load the configuration and connect to HubSpot.
fn connect(
    config_path: Option<&Path>,
    settings: &CliSettings,
) -> Result<(Config, HubSpotAdapter<HubSpotClient>), CliError> {
    let config = Config::load(config_path, Some(settings))?;
    let hubspot = config.require_hubspot()?;
    let client = HubSpotClient::new(&hubspot.base_url, hubspot.token())?;
    Ok((config, HubSpotAdapter::new(client)))
}
