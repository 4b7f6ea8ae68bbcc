//! Guest microvm description shared by both schema versions.
//!
//! These types describe the virtual machine itself - CPU, memory, volumes,
//! kernel and network interfaces - exactly as the backend expects them.
//! Both API versions embed them unchanged, so conversion copies them by
//! value without any transformation.

use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Desired shape of a guest microvm.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VmSpec {
    /// Number of virtual CPUs presented to the guest.
    #[serde(default)]
    pub vcpu: i64,

    /// Guest memory in mebibytes.
    #[serde(default)]
    pub memory_mb: i64,

    /// Volume the guest boots from.
    #[serde(default)]
    pub root_volume: Volume,

    /// Additional volumes attached after the root volume, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_volumes: Vec<Volume>,

    /// Kernel image to boot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernel: Option<ContainerFileSource>,

    /// Optional initial ramdisk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initrd: Option<ContainerFileSource>,

    /// Network interfaces attached to the guest, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub network_interfaces: Vec<NetworkInterface>,
}

impl VmSpec {
    /// Apply defaulting rules to every network interface.
    pub fn apply_defaults(&mut self) {
        for iface in &mut self.network_interfaces {
            iface.apply_defaults();
        }
    }
}

/// A block volume attached to a guest.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    /// Identifier of the volume, unique within the machine.
    pub id: String,

    /// Container image the volume contents come from.
    pub image: String,

    /// Whether the guest sees the volume read-only.
    #[serde(default)]
    pub read_only: bool,
}

/// A file sourced from a container image.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContainerFileSource {
    /// Container image holding the file.
    pub image: String,

    /// Path of the file within the image.
    pub filename: String,
}

/// Kind of host-side device backing a guest network interface.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IfaceType {
    /// A macvtap device bridged onto a host interface.
    #[default]
    Macvtap,
    /// A plain tap device.
    Tap,
}

/// A network interface attached to a guest.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterface {
    /// Device name exposed inside the guest, e.g. `eth0`.
    pub guest_device_name: String,

    /// Hardware address for the guest device; generated at admission time
    /// when left empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_mac: Option<String>,

    /// Kind of host-side device backing the interface.
    #[serde(rename = "type")]
    pub type_: IfaceType,

    /// Static address configuration, when not using DHCP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl NetworkInterface {
    /// Fill in a generated MAC when none was provided.
    ///
    /// Idempotent: an address that is already set is left untouched.
    pub fn apply_defaults(&mut self) {
        if self.guest_mac.as_deref().map_or(true, str::is_empty) {
            self.guest_mac = Some(generate_mac());
        }
    }
}

/// An SSH public key granted access to a guest.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SshPublicKey {
    /// User the keys are authorized for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Keys accepted for the user.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authorized_keys: Vec<String>,
}

/// An HTTP proxy the provider should use when reaching hosts.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Proxy {
    /// Endpoint of the proxy, e.g. `http://proxy:3128`.
    pub endpoint: String,
}

/// Observed lifecycle state of a backing microvm.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VmState {
    /// The microvm is being created.
    Pending,
    /// The microvm is running.
    Running,
    /// The microvm failed.
    Failed,
    /// The microvm is being deleted.
    Deleting,
    /// The state could not be determined.
    Unknown,
}

/// Generate a random MAC in the locally administered, unicast range.
///
/// The low two bits of the first octet are forced to `0b10`: bit 0 clear
/// marks the address unicast, bit 1 set marks it locally administered.
fn generate_mac() -> String {
    let mut octets = [0u8; 6];
    rand::thread_rng().fill(&mut octets[..]);
    octets[0] = (octets[0] & 0xfe) | 0x02;

    octets
        .iter()
        .map(|o| format!("{o:02x}"))
        .collect::<Vec<_>>()
        .join(":")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_valid_mac(mac: &str) -> bool {
        let parts: Vec<&str> = mac.split(':').collect();
        parts.len() == 6
            && parts
                .iter()
                .all(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_hexdigit()))
    }

    #[test]
    fn defaulting_sets_guest_mac_when_empty() {
        let mut iface = NetworkInterface {
            guest_device_name: "eth0".to_string(),
            guest_mac: None,
            type_: IfaceType::Macvtap,
            address: None,
        };

        iface.apply_defaults();

        let mac = iface.guest_mac.expect("MAC should be generated");
        assert!(is_valid_mac(&mac), "unexpected MAC format: {mac}");
    }

    #[test]
    fn defaulting_treats_empty_string_as_unset() {
        let mut iface = NetworkInterface {
            guest_device_name: "eth0".to_string(),
            guest_mac: Some(String::new()),
            type_: IfaceType::Tap,
            address: None,
        };

        iface.apply_defaults();
        assert!(!iface.guest_mac.unwrap().is_empty());
    }

    #[test]
    fn defaulting_leaves_set_guest_mac_unchanged() {
        let existing = "aa:bb:cc:dd:ee:ff";
        let mut iface = NetworkInterface {
            guest_device_name: "eth0".to_string(),
            guest_mac: Some(existing.to_string()),
            type_: IfaceType::Macvtap,
            address: None,
        };

        iface.apply_defaults();
        assert_eq!(iface.guest_mac.as_deref(), Some(existing));
    }

    #[test]
    fn defaulting_is_idempotent() {
        let mut spec = VmSpec {
            network_interfaces: vec![
                NetworkInterface {
                    guest_device_name: "eth0".to_string(),
                    ..Default::default()
                },
                NetworkInterface {
                    guest_device_name: "eth1".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        spec.apply_defaults();
        let after_first = spec.clone();
        spec.apply_defaults();

        assert_eq!(spec, after_first);
        for iface in &spec.network_interfaces {
            assert!(iface.guest_mac.is_some());
        }
    }

    #[test]
    fn generated_macs_are_local_admin_unicast() {
        for _ in 0..32 {
            let mac = generate_mac();
            let first =
                u8::from_str_radix(mac.split(':').next().unwrap(), 16).expect("hex octet");
            assert_eq!(first & 0x01, 0, "multicast bit must be clear: {mac}");
            assert_eq!(first & 0x02, 0x02, "local-admin bit must be set: {mac}");
        }
    }
}
