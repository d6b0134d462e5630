//! Print an Argon2id hash for seeding a member's `password_hash` by hand.
//!
//! Usage: `cargo run --example hash_password -- <password>`

use club_server::auth::{hash_password, validate_new_password};

fn main() -> anyhow::Result<()> {
    let password = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("Usage: hash_password <password>"))?;

    validate_new_password(&password)?;
    println!("{}", hash_password(&password)?);
    Ok(())
}
