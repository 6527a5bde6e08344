//! Node identity and the fixed descriptor documents served by the fake cluster.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

/// Cluster name reported by every node.
pub const CLUSTER_NAME: &str = "fake-cluster";

/// Characters a cluster id is drawn from.
const CLUSTER_UUID_ALPHABET: &[u8] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length of a generated cluster id.
pub const CLUSTER_UUID_LEN: usize = 20;

/// Emulated server version.
const VERSION_NUMBER: &str = "7.3.1";
const BUILD_HASH: &str = "de777fa";
const BUILD_DATE: &str = "2019-07-24T18:30:11.767338Z";

/// Identity of this node, generated once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeIdentity {
    pub node_name: String,
    pub cluster_name: String,
    pub cluster_uuid: String,
}

impl NodeIdentity {
    /// Generate an identity from `rng`.
    ///
    /// The node name is `fake-node-<n>` with `n` in `0..100`; the cluster id
    /// is 20 distinct characters of the alphanumeric alphabet in random order.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut alphabet = CLUSTER_UUID_ALPHABET.to_vec();
        alphabet.shuffle(rng);
        let cluster_uuid = alphabet[..CLUSTER_UUID_LEN]
            .iter()
            .map(|&b| b as char)
            .collect();

        Self {
            node_name: format!("fake-node-{}", rng.gen_range(0..100)),
            cluster_name: CLUSTER_NAME.to_string(),
            cluster_uuid,
        }
    }

    /// Generate an identity from a fixed seed, or from OS entropy when `None`.
    pub fn from_seed(seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::generate(&mut rng)
    }

    /// Document served on `GET /`.
    pub fn descriptor(&self) -> Value {
        json!({
            "name": self.node_name,
            "cluster_name": self.cluster_name,
            "cluster_uuid": self.cluster_uuid,
            "version": {
                "number": VERSION_NUMBER,
                "build_flavor": "default",
                "build_type": "rpm",
                "build_hash": BUILD_HASH,
                "build_date": BUILD_DATE,
                "build_snapshot": false,
                "lucene_version": "8.1.0",
                "minimum_wire_compatibility_version": "6.8.0",
                "minimum_index_compatibility_version": "6.0.0-beta1"
            },
            "tagline": "You Know, for Search"
        })
    }
}

/// Document served on `GET /_xpack`.
///
/// ILM is reported as disabled so agents do not try to manage lifecycle
/// policies, which the fake cluster does not serve.
pub fn xpack_descriptor() -> Value {
    json!({
        "build": {
            "hash": BUILD_HASH,
            "date": BUILD_DATE
        },
        "license": {
            "uid": "9ff14a29-65b3-4c8b-bbc2-bf06ecdeb52b",
            "type": "basic",
            "mode": "basic",
            "status": "active"
        },
        "features": {
            "ccr": { "available": false, "enabled": true },
            "data_frame": { "available": true, "enabled": true },
            "flattened": { "available": true, "enabled": true },
            "graph": { "available": false, "enabled": true },
            "ilm": { "available": true, "enabled": false },
            "logstash": { "available": false, "enabled": true },
            "ml": { "available": false, "enabled": true },
            "monitoring": { "available": true, "enabled": true },
            "rollup": { "available": true, "enabled": true },
            "security": { "available": true, "enabled": false },
            "sql": { "available": true, "enabled": true },
            "vectors": { "available": true, "enabled": true },
            "voting_only": { "available": true, "enabled": true },
            "watcher": { "available": false, "enabled": true }
        }
    })
}
