pub mod infinitiview;
mod payload;
pub mod ragbot;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::ClientBox;
use crate::domain::models::ClientName;

pub struct ClientManager {}

impl ClientManager {
    pub fn get(name: &str) -> Result<ClientBox> {
        if let Some(client_name) = ClientName::parse(name) {
            match client_name {
                ClientName::InfinitiView => {
                    return Ok(Box::<infinitiview::InfinitiView>::default());
                }
                ClientName::RagBot => return Ok(Box::<ragbot::RagBot>::default()),
            }
        }

        bail!(format!("No client implemented for {name}"))
    }
}
