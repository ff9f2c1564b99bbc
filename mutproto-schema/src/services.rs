//! Service definitions.

use crate::messages::OptionDef;
use serde::{Deserialize, Serialize};

/// Service definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDef {
    /// Service name.
    pub name: String,
    /// Members in source order.
    #[serde(default)]
    pub members: Vec<ServiceMember>,
}

impl ServiceDef {
    /// Creates a new empty service.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Adds an RPC to the service.
    pub fn add_rpc(&mut self, rpc: RpcDef) {
        self.members.push(ServiceMember::Rpc(rpc));
    }

    /// Iterates the RPCs.
    pub fn rpcs(&self) -> impl Iterator<Item = &RpcDef> {
        self.members.iter().filter_map(|member| match member {
            ServiceMember::Rpc(rpc) => Some(rpc),
            ServiceMember::Option(_) => None,
        })
    }
}

/// Member of a service definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceMember {
    /// `option name = value;`
    Option(OptionDef),
    /// RPC method.
    Rpc(RpcDef),
}

/// RPC method definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcDef {
    /// Method name.
    pub name: String,
    /// Whether the request is streamed.
    #[serde(default)]
    pub in_stream: bool,
    /// Request message name.
    pub in_type: String,
    /// Whether the response is streamed.
    #[serde(default)]
    pub out_stream: bool,
    /// Response message name.
    pub out_type: String,
    /// Method options.
    #[serde(default)]
    pub options: Vec<OptionDef>,
}

impl RpcDef {
    /// Creates a unary RPC.
    #[must_use]
    pub fn unary(
        name: impl Into<String>,
        in_type: impl Into<String>,
        out_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            in_stream: false,
            in_type: in_type.into(),
            out_stream: false,
            out_type: out_type.into(),
            options: Vec::new(),
        }
    }
}
