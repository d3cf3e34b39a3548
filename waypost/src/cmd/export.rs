use anyhow::Result;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use super::Command;
use crate::adv;
use crate::cli;
use crate::ident;
use crate::keystore::BeaconPk;
use crate::util::LoadValue;

impl Command for cli::Export {
    fn run(self) -> Result<()> {
        let pk = BeaconPk::load(&self.public_key)?;
        let (address, payload) = adv::encode(&pk);

        println!("advertisement key (base64): {}", BASE64.encode(&*pk));
        println!("lookup id (base64):         {}", ident::lookup_id_b64(&pk));
        println!("broadcast address:          {address}");
        println!("payload (hex):              {}", hex::encode(payload.to_bytes()));

        if self.c_array {
            println!();
            println!("{}", c_array(&pk));
        }

        Ok(())
    }
}

/// Renders the key the way the firmware source expects it
fn c_array(pk: &[u8; 28]) -> String {
    let bytes = pk
        .iter()
        .map(|b| format!("0x{b:02x}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("static uint8_t public_key[28] = {{{bytes}}};")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c_array_renders_all_bytes() {
        let rendered = c_array(&[0u8; 28]);
        assert!(rendered.starts_with("static uint8_t public_key[28] = {0x00"));
        assert_eq!(rendered.matches("0x00").count(), 28);
    }
}
