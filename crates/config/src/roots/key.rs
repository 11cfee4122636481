//! Private key decoding and the signing capability.
//!
//! Responsibilities:
//! - Decode PEM private keys (PKCS#1, SEC1, PKCS#8) into a concrete key type.
//! - Expose every key type through the `Signer` capability.
//! - Compare a key against a certificate's SubjectPublicKeyInfo.
//!
//! Does NOT handle:
//! - Reading key files (see `loader.rs`).
//! - Hardware or module-backed keys; those never reach this module.
//!
//! Invariants:
//! - `Debug` output never contains key material.
//! - The algorithm is determined from the key bytes, never declared in config.

use std::fmt;

use p256::ecdsa::signature::Signer as _;
use pkcs8::{DecodePrivateKey, DecodePublicKey, ObjectIdentifier, PrivateKeyInfo};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::signature::SignatureEncoding;
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use rustls_pki_types::PrivateKeyDer;
use sha2::Sha256;
use thiserror::Error;

const RSA_ENCRYPTION: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");
const EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
const SECP256R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
const SECP384R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");

/// Reasons a private key file could not be turned into a usable key.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("malformed PEM data: {0}")]
    Pem(#[source] std::io::Error),

    #[error(
        "no private key found (expected an RSA PRIVATE KEY, EC PRIVATE KEY or unencrypted PRIVATE KEY block)"
    )]
    NoKeyFound,

    #[error("unsupported key algorithm {0}")]
    UnsupportedAlgorithm(ObjectIdentifier),

    #[error("unsupported elliptic curve {0}")]
    UnsupportedCurve(ObjectIdentifier),

    #[error("invalid {encoding} private key: {message}")]
    Decode {
        encoding: &'static str,
        message: String,
    },
}

impl KeyError {
    fn decode(encoding: &'static str, error: impl fmt::Display) -> Self {
        Self::Decode {
            encoding,
            message: error.to_string(),
        }
    }
}

/// Failure to produce a signature with a loaded key.
#[derive(Error, Debug)]
#[error("signing with {algorithm} key failed: {source}")]
pub struct SignError {
    pub algorithm: KeyAlgorithm,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

/// Concrete algorithm of a loaded key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    Rsa { bits: usize },
    EcdsaP256,
    EcdsaP384,
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rsa { bits } => write!(f, "RSA-{bits}"),
            Self::EcdsaP256 => f.write_str("ECDSA-P256"),
            Self::EcdsaP384 => f.write_str("ECDSA-P384"),
        }
    }
}

/// Something that can sign on behalf of a root.
///
/// RSA keys produce PKCS#1 v1.5 signatures over SHA-256. ECDSA keys produce
/// DER-encoded signatures over SHA-256 (P-256) or SHA-384 (P-384).
pub trait Signer: Send + Sync {
    fn algorithm(&self) -> KeyAlgorithm;

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignError>;
}

pub struct RsaKey {
    key: RsaPrivateKey,
}

impl RsaKey {
    pub fn public_key(&self) -> RsaPublicKey {
        self.key.to_public_key()
    }
}

impl Signer for RsaKey {
    fn algorithm(&self) -> KeyAlgorithm {
        KeyAlgorithm::Rsa {
            bits: self.key.size() * 8,
        }
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignError> {
        let signing_key = rsa::pkcs1v15::SigningKey::<Sha256>::new(self.key.clone());
        let signature = signing_key
            .try_sign(message)
            .map_err(|e| SignError {
                algorithm: self.algorithm(),
                source: Box::new(e),
            })?;
        Ok(signature.to_vec())
    }
}

pub struct EcdsaP256Key {
    key: p256::SecretKey,
}

impl EcdsaP256Key {
    pub fn public_key(&self) -> p256::PublicKey {
        self.key.public_key()
    }
}

impl Signer for EcdsaP256Key {
    fn algorithm(&self) -> KeyAlgorithm {
        KeyAlgorithm::EcdsaP256
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignError> {
        let signing_key = p256::ecdsa::SigningKey::from(&self.key);
        let signature: p256::ecdsa::Signature =
            signing_key.try_sign(message).map_err(|e| SignError {
                algorithm: self.algorithm(),
                source: Box::new(e),
            })?;
        Ok(signature.to_der().as_bytes().to_vec())
    }
}

pub struct EcdsaP384Key {
    key: p384::SecretKey,
}

impl EcdsaP384Key {
    pub fn public_key(&self) -> p384::PublicKey {
        self.key.public_key()
    }
}

impl Signer for EcdsaP384Key {
    fn algorithm(&self) -> KeyAlgorithm {
        KeyAlgorithm::EcdsaP384
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignError> {
        let signing_key = p384::ecdsa::SigningKey::from(&self.key);
        let signature: p384::ecdsa::Signature =
            signing_key.try_sign(message).map_err(|e| SignError {
                algorithm: self.algorithm(),
                source: Box::new(e),
            })?;
        Ok(signature.to_der().as_bytes().to_vec())
    }
}

/// A decoded private key of any supported algorithm.
pub enum PrivateKey {
    Rsa(Box<RsaKey>),
    EcdsaP256(EcdsaP256Key),
    EcdsaP384(EcdsaP384Key),
}

impl PrivateKey {
    /// Decodes the first private key block found in `pem`.
    ///
    /// # Errors
    /// Returns `KeyError` when the PEM is malformed, holds no supported key
    /// block, or the key uses an algorithm or curve outside RSA, P-256, P-384.
    pub fn from_pem(pem: &[u8]) -> Result<Self, KeyError> {
        let mut reader = pem;
        let der = rustls_pemfile::private_key(&mut reader)
            .map_err(KeyError::Pem)?
            .ok_or(KeyError::NoKeyFound)?;

        match der {
            PrivateKeyDer::Pkcs1(der) => Self::from_pkcs1_der(der.secret_pkcs1_der()),
            PrivateKeyDer::Sec1(der) => Self::from_sec1_der(der.secret_sec1_der()),
            PrivateKeyDer::Pkcs8(der) => Self::from_pkcs8_der(der.secret_pkcs8_der()),
            _ => Err(KeyError::NoKeyFound),
        }
    }

    fn from_pkcs1_der(der: &[u8]) -> Result<Self, KeyError> {
        let key = RsaPrivateKey::from_pkcs1_der(der).map_err(|e| KeyError::decode("PKCS#1", e))?;
        Ok(Self::Rsa(Box::new(RsaKey { key })))
    }

    /// SEC1 keys may omit the curve, so try each supported curve in turn.
    fn from_sec1_der(der: &[u8]) -> Result<Self, KeyError> {
        if let Ok(key) = p256::SecretKey::from_sec1_der(der) {
            return Ok(Self::EcdsaP256(EcdsaP256Key { key }));
        }
        p384::SecretKey::from_sec1_der(der)
            .map(|key| Self::EcdsaP384(EcdsaP384Key { key }))
            .map_err(|e| KeyError::decode("SEC1", e))
    }

    fn from_pkcs8_der(der: &[u8]) -> Result<Self, KeyError> {
        let info = PrivateKeyInfo::try_from(der).map_err(|e| KeyError::decode("PKCS#8", e))?;

        let algorithm = info.algorithm.oid;
        if algorithm == RSA_ENCRYPTION {
            let key =
                RsaPrivateKey::from_pkcs8_der(der).map_err(|e| KeyError::decode("PKCS#8", e))?;
            return Ok(Self::Rsa(Box::new(RsaKey { key })));
        }
        if algorithm != EC_PUBLIC_KEY {
            return Err(KeyError::UnsupportedAlgorithm(algorithm));
        }

        let curve = info
            .algorithm
            .parameters_oid()
            .map_err(|e| KeyError::decode("PKCS#8", e))?;
        if curve == SECP256R1 {
            p256::SecretKey::from_pkcs8_der(der)
                .map(|key| Self::EcdsaP256(EcdsaP256Key { key }))
                .map_err(|e| KeyError::decode("PKCS#8", e))
        } else if curve == SECP384R1 {
            p384::SecretKey::from_pkcs8_der(der)
                .map(|key| Self::EcdsaP384(EcdsaP384Key { key }))
                .map_err(|e| KeyError::decode("PKCS#8", e))
        } else {
            Err(KeyError::UnsupportedCurve(curve))
        }
    }

    fn as_signer(&self) -> &dyn Signer {
        match self {
            Self::Rsa(key) => &**key,
            Self::EcdsaP256(key) => key,
            Self::EcdsaP384(key) => key,
        }
    }

    /// Returns true if `spki_der` encodes this key's public half.
    ///
    /// A SubjectPublicKeyInfo for a different algorithm or curve is a mismatch,
    /// not an error.
    pub fn matches_public_key_der(&self, spki_der: &[u8]) -> bool {
        match self {
            Self::Rsa(key) => RsaPublicKey::from_public_key_der(spki_der)
                .is_ok_and(|public| public == key.public_key()),
            Self::EcdsaP256(key) => p256::PublicKey::from_public_key_der(spki_der)
                .is_ok_and(|public| public == key.public_key()),
            Self::EcdsaP384(key) => p384::PublicKey::from_public_key_der(spki_der)
                .is_ok_and(|public| public == key.public_key()),
        }
    }
}

impl Signer for PrivateKey {
    fn algorithm(&self) -> KeyAlgorithm {
        self.as_signer().algorithm()
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignError> {
        self.as_signer().sign(message)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("algorithm", &format_args!("{}", self.algorithm()))
            .finish_non_exhaustive()
    }
}
