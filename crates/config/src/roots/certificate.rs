//! Root certificate decoding.
//!
//! Responsibilities:
//! - Decode exactly one PEM certificate into a parsed X.509 structure.
//! - Keep the DER encoding alongside for consumers that re-emit it.
//!
//! Does NOT handle:
//! - Chain building or trust validation; a root file names one certificate.

use std::fmt;

use sha2::{Digest, Sha256};
use thiserror::Error;
use x509_cert::Certificate;
use x509_cert::der::{Decode, Encode};

/// Reasons a certificate file could not be turned into a usable certificate.
#[derive(Error, Debug)]
pub enum CertificateError {
    #[error("malformed PEM data: {0}")]
    Pem(#[source] std::io::Error),

    #[error("no CERTIFICATE block found")]
    NoCertificate,

    #[error("expected exactly one certificate, found {0}")]
    MultipleCertificates(usize),

    #[error("invalid X.509 certificate: {0}")]
    Der(#[source] x509_cert::der::Error),
}

/// A parsed root certificate together with its DER encoding.
#[derive(Clone)]
pub struct RootCertificate {
    parsed: Certificate,
    der: Vec<u8>,
}

impl RootCertificate {
    /// Decodes the single certificate contained in `pem`.
    pub fn from_pem(pem: &[u8]) -> Result<Self, CertificateError> {
        let mut reader = pem;
        let mut blocks = rustls_pemfile::certs(&mut reader)
            .collect::<Result<Vec<_>, _>>()
            .map_err(CertificateError::Pem)?;

        let der = match blocks.len() {
            0 => return Err(CertificateError::NoCertificate),
            1 => blocks.remove(0).as_ref().to_vec(),
            count => return Err(CertificateError::MultipleCertificates(count)),
        };

        let parsed = Certificate::from_der(&der).map_err(CertificateError::Der)?;
        Ok(Self { parsed, der })
    }

    pub fn certificate(&self) -> &Certificate {
        &self.parsed
    }

    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// Subject distinguished name in RFC 4514 form.
    pub fn subject(&self) -> String {
        self.parsed.tbs_certificate.subject.to_string()
    }

    /// SHA-256 digest of the DER encoding.
    pub fn fingerprint_sha256(&self) -> [u8; 32] {
        Sha256::digest(&self.der).into()
    }

    /// DER encoding of the certificate's SubjectPublicKeyInfo.
    pub(crate) fn public_key_der(&self) -> Result<Vec<u8>, CertificateError> {
        self.parsed
            .tbs_certificate
            .subject_public_key_info
            .to_der()
            .map_err(CertificateError::Der)
    }
}

impl fmt::Debug for RootCertificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootCertificate")
            .field("subject", &self.subject())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIMARY: &[u8] = include_bytes!("../../tests/testdata/primary.crt");
    const CHAIN: &[u8] = include_bytes!("../../tests/testdata/chain.crt");
    const NOT_PEM: &[u8] = include_bytes!("../../tests/testdata/bad.crt");
    const KEY: &[u8] = include_bytes!("../../tests/testdata/primary.key");

    #[test]
    fn test_decodes_single_certificate() {
        let cert = RootCertificate::from_pem(PRIMARY).unwrap();
        assert!(cert.subject().contains("CN=Primary Test Root"));
        assert!(!cert.der().is_empty());
        assert!(!cert.public_key_der().unwrap().is_empty());
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let first = RootCertificate::from_pem(PRIMARY).unwrap();
        let second = RootCertificate::from_pem(PRIMARY).unwrap();
        assert_eq!(first.fingerprint_sha256(), second.fingerprint_sha256());
    }

    #[test]
    fn test_rejects_chain() {
        let err = RootCertificate::from_pem(CHAIN).unwrap_err();
        assert!(matches!(err, CertificateError::MultipleCertificates(2)));
    }

    #[test]
    fn test_rejects_non_certificates() {
        assert!(matches!(
            RootCertificate::from_pem(NOT_PEM),
            Err(CertificateError::NoCertificate)
        ));
        assert!(matches!(
            RootCertificate::from_pem(KEY),
            Err(CertificateError::NoCertificate)
        ));
    }

    #[test]
    fn test_rejects_corrupt_der() {
        let pem = b"-----BEGIN CERTIFICATE-----\nMAA=\n-----END CERTIFICATE-----\n";
        assert!(matches!(
            RootCertificate::from_pem(pem),
            Err(CertificateError::Der(_))
        ));
    }
}
