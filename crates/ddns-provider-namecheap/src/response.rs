// XML answer of the dynamic DNS endpoint
//
// A typical answer:
//
// ```xml
// <?xml version="1.0" encoding="utf-16"?>
// <interface-response>
//   <Command>SETDNSHOST</Command>
//   <Language>eng</Language>
//   <IP>198.51.100.9</IP>
//   <ErrCount>0</ErrCount>
//   <errors />
//   <ResponseCount>0</ResponseCount>
//   <Done>true</Done>
//   <debug><![CDATA[]]></debug>
// </interface-response>
// ```
//
// The root element must be `interface-response`. Only `ErrCount` and
// `errors/Err1` decide the outcome; other elements are ignored.

use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Deserialize;

/// Root element of every answer
const ROOT_ELEMENT: &str = "interface-response";

/// Message used when the provider reports errors without describing them
pub const UNDESCRIBED_ERROR: &str = "Provider reported an error without a message";

#[derive(Debug, Deserialize)]
#[serde(rename = "interface-response")]
struct InterfaceResponse {
    #[serde(rename = "ErrCount")]
    err_count: String,

    #[serde(default)]
    errors: Option<Errors>,
}

#[derive(Debug, Default, Deserialize)]
struct Errors {
    #[serde(rename = "Err1", default)]
    err1: Option<String>,
}

/// Provider verdict on one update request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderResponse {
    /// `ErrCount` was zero
    Accepted,

    /// `ErrCount` was non-zero; carries the first error text
    Rejected(String),
}

impl ProviderResponse {
    /// Parse the XML body
    ///
    /// Returns the parser message when the body is not an
    /// `interface-response` document with an `ErrCount` element.
    pub fn parse(body: &str) -> Result<Self, String> {
        let root = root_element(body)?;
        if root != ROOT_ELEMENT {
            return Err(format!(
                "unexpected root element <{}>, expected <{}>",
                root, ROOT_ELEMENT
            ));
        }

        let response: InterfaceResponse =
            quick_xml::de::from_str(body).map_err(|e| e.to_string())?;

        if response.err_count.trim() == "0" {
            return Ok(ProviderResponse::Accepted);
        }

        let message = response
            .errors
            .and_then(|errors| errors.err1)
            .map(|msg| msg.trim().to_string())
            .filter(|msg| !msg.is_empty())
            .unwrap_or_else(|| UNDESCRIBED_ERROR.to_string());

        Ok(ProviderResponse::Rejected(message))
    }
}

/// Name of the first element in `body`
fn root_element(body: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(body);
    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(element) | Event::Empty(element) => {
                return Ok(String::from_utf8_lossy(element.name().as_ref()).into_owned());
            }
            Event::Eof => return Err("document has no root element".to_string()),
            _ => {}
        }
    }
}
