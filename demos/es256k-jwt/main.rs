//! Simple program to generate a secp256k1 key, and to sign and verify a
//! JsonWebToken (JWT) using ES256K

use std::io::read_to_string;

use clap::Parser;
use clio::Input;
use eyre::eyre;
use jose_es256k::{
    crypto::secp256k1, jwa::JsonWebSigningAlgorithm, jwt::Claims, Es256kSigner, Es256kVerifier,
    JsonWebSignature, JwsHeader,
};

#[derive(Parser)]
enum Commands {
    /// Generates a secp256k1 key pair and prints both keys hex encoded
    Generate,
    /// Signs a set of claims with a hex encoded private key
    Sign {
        /// Key used to sign the JsonWebToken
        key: Input,
        /// The claims that this JWT should contain, as JSON object
        payload: Input,
        /// Value of the `kid` header parameter
        #[arg(short, long)]
        kid: Option<String>,
        /// Mix fresh randomness into the signature nonce
        #[arg(short, long)]
        randomized: bool,
    },
    /// Verifies a JsonWebToken with a hex encoded public key
    Verify { jwt: String, key: Input },
}

fn read_hex(input: Input) -> eyre::Result<Vec<u8>> {
    Ok(hex::decode(read_to_string(input)?.trim())?)
}

fn main() -> eyre::Result<()> {
    let cmds = Commands::parse();

    match cmds {
        Commands::Generate => {
            let private_key = secp256k1::generate_private_key()?;
            let public_key = secp256k1::derive_public_key(&*private_key)?;

            println!("Private:\n{}", hex::encode(&*private_key));
            println!("Public:\n{}", hex::encode(public_key));
        }
        Commands::Sign {
            key,
            payload,
            kid,
            randomized,
        } => {
            let signer = Es256kSigner::new(&read_hex(key)?)?.with_extra_entropy(randomized);
            let claims = Claims::from_json_str(&read_to_string(payload)?)?;

            let mut header = JwsHeader::new(JsonWebSigningAlgorithm::Es256K);
            header.set_media_type("JWT");
            if let Some(kid) = kid {
                header.set_key_id(kid);
            }

            let mut jwt = JsonWebSignature::new(header, claims.to_bytes()?)?;
            jwt.sign(&signer)?;
            println!("JWT: {}", jwt.serialize()?);
        }
        Commands::Verify { jwt, key } => {
            let verifier = Es256kVerifier::new(read_hex(key)?);
            let jwt = JsonWebSignature::parse(&jwt)?;

            if !jwt.verify(&verifier)? {
                return Err(eyre!("Signature does not match"));
            }

            let claims = Claims::from_json_bytes(jwt.payload())?;
            println!(
                "JWT: Iss {:?}, Sub {:?}, Exp {:?}",
                claims.issuer()?,
                claims.subject()?,
                claims.expiration_time()?
            )
        }
    }
    Ok(())
}
