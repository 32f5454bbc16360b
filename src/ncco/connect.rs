use serde::Serialize;

/// Bridges the current call to one or more endpoints.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Connect {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    pub endpoint: Vec<Endpoint>,
}

impl Connect {
    pub fn phone(from: Option<&str>, number: Option<&str>) -> Self {
        Self {
            from: from.map(str::to_owned),
            endpoint: vec![Endpoint::Phone {
                number: number.map(str::to_owned),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Endpoint {
    Phone {
        #[serde(skip_serializing_if = "Option::is_none")]
        number: Option<String>,
    },
}
