//! The resolved set of signing roots.

use std::collections::BTreeMap;
use std::collections::btree_map;

use super::certificate::RootCertificate;
use super::key::{PrivateKey, Signer};

/// A labeled signing identity: a decoded private key and its certificate.
#[derive(Debug)]
pub struct Root {
    label: String,
    private_key: PrivateKey,
    certificate: RootCertificate,
}

impl Root {
    pub(crate) fn new(label: String, private_key: PrivateKey, certificate: RootCertificate) -> Self {
        Self {
            label,
            private_key,
            certificate,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    /// The root's key as a signing capability.
    pub fn signer(&self) -> &dyn Signer {
        &self.private_key
    }

    pub fn certificate(&self) -> &RootCertificate {
        &self.certificate
    }
}

/// Immutable label-to-root mapping.
///
/// A registry only exists once every section of its roots file resolved;
/// there is no partially loaded state.
#[derive(Debug, Default)]
pub struct RootRegistry {
    roots: BTreeMap<String, Root>,
}

impl RootRegistry {
    pub(crate) fn from_map(roots: BTreeMap<String, Root>) -> Self {
        Self { roots }
    }

    pub fn get(&self, label: &str) -> Option<&Root> {
        self.roots.get(label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.roots.contains_key(label)
    }

    /// Labels in sorted order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.roots.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Root> {
        self.roots.values()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

impl<'a> IntoIterator for &'a RootRegistry {
    type Item = &'a Root;
    type IntoIter = btree_map::Values<'a, String, Root>;

    fn into_iter(self) -> Self::IntoIter {
        self.roots.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(label: &str) -> Root {
        let key = PrivateKey::from_pem(include_bytes!("../../tests/testdata/backup.key")).unwrap();
        let cert =
            RootCertificate::from_pem(include_bytes!("../../tests/testdata/backup.crt")).unwrap();
        Root::new(label.to_string(), key, cert)
    }

    #[test]
    fn test_lookup_and_iteration() {
        let registry = RootRegistry::from_map(
            ["zeta", "alpha"]
                .into_iter()
                .map(|label| (label.to_string(), root(label)))
                .collect(),
        );

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("alpha"));
        assert!(!registry.contains("beta"));
        assert_eq!(registry.get("zeta").unwrap().label(), "zeta");
        assert_eq!(registry.labels().collect::<Vec<_>>(), vec!["alpha", "zeta"]);
        assert_eq!((&registry).into_iter().count(), 2);
    }

    #[test]
    fn test_empty_registry() {
        let registry = RootRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.get("anything").is_none());
    }

    #[test]
    fn test_registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RootRegistry>();
    }
}
