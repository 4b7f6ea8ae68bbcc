//! MicrovmMachine conversion.

use crate::api::v1alpha1;
use crate::api::v1alpha2::{
    MachineAddress, MachineAddressType, MicrovmMachine, MicrovmMachineSpec, MicrovmMachineStatus,
};
use crate::conversion::Convertible;

impl Convertible for MicrovmMachine {
    type Hub = v1alpha1::MicrovmMachine;

    fn convert_to(&self) -> v1alpha1::MicrovmMachine {
        v1alpha1::MicrovmMachine {
            metadata: self.metadata.clone(),
            spec: v1alpha1::MicrovmMachineSpec {
                vm_spec: self.spec.vm_spec.clone(),
                ssh_public_keys: self.spec.ssh_public_keys.clone(),
                provider_id: self.spec.provider_id.clone(),
            },
            status: self.status.as_ref().map(status_to_hub),
        }
    }

    fn convert_from(hub: &v1alpha1::MicrovmMachine) -> Self {
        Self {
            metadata: hub.metadata.clone(),
            spec: MicrovmMachineSpec {
                vm_spec: hub.spec.vm_spec.clone(),
                ssh_public_keys: hub.spec.ssh_public_keys.clone(),
                provider_id: hub.spec.provider_id.clone(),
            },
            status: hub.status.as_ref().map(status_from_hub),
        }
    }
}

fn status_to_hub(status: &MicrovmMachineStatus) -> v1alpha1::MicrovmMachineStatus {
    v1alpha1::MicrovmMachineStatus {
        ready: status.ready,
        vm_state: status.vm_state,
        addresses: status
            .addresses
            .as_deref()
            .map(|addrs| addrs.iter().map(address_to_hub).collect()),
        failure_reason: status.failure_reason.clone(),
        failure_message: status.failure_message.clone(),
        conditions: status.conditions.clone(),
    }
}

fn status_from_hub(status: &v1alpha1::MicrovmMachineStatus) -> MicrovmMachineStatus {
    MicrovmMachineStatus {
        ready: status.ready,
        vm_state: status.vm_state,
        addresses: status
            .addresses
            .as_deref()
            .map(|addrs| addrs.iter().map(address_from_hub).collect()),
        failure_reason: status.failure_reason.clone(),
        failure_message: status.failure_message.clone(),
        conditions: status.conditions.clone(),
    }
}

fn address_to_hub(address: &MachineAddress) -> v1alpha1::MachineAddress {
    v1alpha1::MachineAddress {
        type_: address_type_to_hub(address.type_),
        address: address.address.clone(),
    }
}

fn address_from_hub(address: &v1alpha1::MachineAddress) -> MachineAddress {
    MachineAddress {
        type_: address_type_from_hub(address.type_),
        address: address.address.clone(),
    }
}

fn address_type_to_hub(type_: MachineAddressType) -> v1alpha1::MachineAddressType {
    match type_ {
        MachineAddressType::Hostname => v1alpha1::MachineAddressType::Hostname,
        MachineAddressType::ExternalIp => v1alpha1::MachineAddressType::ExternalIp,
        MachineAddressType::InternalIp => v1alpha1::MachineAddressType::InternalIp,
        MachineAddressType::ExternalDns => v1alpha1::MachineAddressType::ExternalDns,
        MachineAddressType::InternalDns => v1alpha1::MachineAddressType::InternalDns,
    }
}

fn address_type_from_hub(type_: v1alpha1::MachineAddressType) -> MachineAddressType {
    match type_ {
        v1alpha1::MachineAddressType::Hostname => MachineAddressType::Hostname,
        v1alpha1::MachineAddressType::ExternalIp => MachineAddressType::ExternalIp,
        v1alpha1::MachineAddressType::InternalIp => MachineAddressType::InternalIp,
        v1alpha1::MachineAddressType::ExternalDns => MachineAddressType::ExternalDns,
        v1alpha1::MachineAddressType::InternalDns => MachineAddressType::InternalDns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::microvm::{IfaceType, NetworkInterface, VmSpec, VmState};

    #[test]
    fn convert_to_and_back_round_trips() {
        let mut machine = MicrovmMachine::new(
            "machine-1",
            MicrovmMachineSpec {
                vm_spec: VmSpec {
                    vcpu: 2,
                    memory_mb: 2048,
                    network_interfaces: vec![NetworkInterface {
                        guest_device_name: "eth0".to_string(),
                        guest_mac: Some("aa:bb:cc:dd:ee:ff".to_string()),
                        type_: IfaceType::Macvtap,
                        address: None,
                    }],
                    ..Default::default()
                },
                provider_id: Some("microvm://fd1/abc".to_string()),
                ..Default::default()
            },
        );
        machine.metadata.namespace = Some("default".to_string());
        machine.status = Some(MicrovmMachineStatus {
            ready: true,
            vm_state: Some(VmState::Running),
            addresses: Some(vec![MachineAddress {
                type_: MachineAddressType::InternalIp,
                address: "10.0.0.1".to_string(),
            }]),
            ..Default::default()
        });

        let hub = machine.convert_to();
        assert_eq!(hub.spec.provider_id.as_deref(), Some("microvm://fd1/abc"));
        assert_eq!(hub.spec.vm_spec, machine.spec.vm_spec);

        let hub_status = hub.status.as_ref().unwrap();
        assert!(hub_status.ready);
        assert_eq!(hub_status.vm_state, Some(VmState::Running));

        let addrs = hub_status.addresses.as_ref().unwrap();
        assert_eq!(addrs.len(), 1);
        assert_eq!(addrs[0].type_, v1alpha1::MachineAddressType::InternalIp);
        assert_eq!(addrs[0].address, "10.0.0.1");

        let back = MicrovmMachine::convert_from(&hub);
        assert_eq!(back, machine);
    }

    #[test]
    fn unset_addresses_stay_unset() {
        let mut hub =
            v1alpha1::MicrovmMachine::new("m", v1alpha1::MicrovmMachineSpec::default());
        hub.metadata.namespace = Some("default".to_string());
        hub.status = Some(v1alpha1::MicrovmMachineStatus::default());

        let spoke = MicrovmMachine::convert_from(&hub);
        assert!(spoke.status.as_ref().unwrap().addresses.is_none());

        let hub2 = spoke.convert_to();
        assert!(hub2.status.as_ref().unwrap().addresses.is_none());
    }

    #[test]
    fn every_address_type_remaps_one_to_one() {
        let types = [
            MachineAddressType::Hostname,
            MachineAddressType::ExternalIp,
            MachineAddressType::InternalIp,
            MachineAddressType::ExternalDns,
            MachineAddressType::InternalDns,
        ];

        for type_ in types {
            let remapped = address_type_from_hub(address_type_to_hub(type_));
            assert_eq!(remapped, type_);
        }
    }

    #[test]
    fn failure_fields_copy_verbatim() {
        let mut machine = MicrovmMachine::new("m", MicrovmMachineSpec::default());
        machine.status = Some(MicrovmMachineStatus {
            failure_reason: Some("CreateError".to_string()),
            failure_message: Some("host rejected the request".to_string()),
            ..Default::default()
        });

        let hub = machine.convert_to();
        let status = hub.status.as_ref().unwrap();
        assert_eq!(status.failure_reason.as_deref(), Some("CreateError"));
        assert_eq!(
            status.failure_message.as_deref(),
            Some("host rejected the request")
        );
    }
}
