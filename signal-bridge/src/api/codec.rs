//! JSON envelope codec for method calls and outcomes.
//!
//! Uses the framing method-channel hosts expect on the wire:
//!
//! | Message          | Encoding                              |
//! |------------------|---------------------------------------|
//! | method call      | `{"method": "<name>", "args": <any>}` |
//! | success          | `[<value>]`                           |
//! | failure          | `["<code>", "<message>", null]`       |
//! | not implemented  | empty payload                         |
//!
//! An empty failure message is written as `null`, the same way an absent
//! fault description is.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::models::{CodecError, MethodCall, Outcome};

#[derive(Serialize, Deserialize)]
struct WireCall {
    method: String,
    #[serde(default)]
    args: Option<Value>,
}

/// Decodes a method call.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if the payload is not a JSON object with a
/// string `method` field.
pub fn decode_method_call(buf: &[u8]) -> Result<MethodCall, CodecError> {
    let wire: WireCall = serde_json::from_slice(buf)?;
    let call = MethodCall::new(wire.method);
    Ok(match wire.args {
        Some(args) => call.with_arguments(args),
        None => call,
    })
}

/// Encodes a method call.
pub fn encode_method_call(call: &MethodCall) -> Result<Vec<u8>, CodecError> {
    let wire = WireCall {
        method: call.name().to_string(),
        args: call.arguments().cloned(),
    };
    Ok(serde_json::to_vec(&wire)?)
}

/// Encodes an outcome as a reply envelope.
pub fn encode_outcome(outcome: &Outcome) -> Result<Vec<u8>, CodecError> {
    let envelope = match outcome {
        Outcome::Success(value) => Value::from(vec![Value::from(*value)]),
        Outcome::Failure { code, message } => {
            let message = if message.is_empty() {
                Value::Null
            } else {
                Value::from(message.as_str())
            };
            Value::from(vec![Value::from(code.as_str()), message, Value::Null])
        }
        Outcome::NotImplemented => return Ok(Vec::new()),
    };
    Ok(serde_json::to_vec(&envelope)?)
}

/// Decodes a reply envelope.
///
/// An empty (or all-whitespace) payload is [`Outcome::NotImplemented`]; a
/// `null` failure message decodes as an empty string.
///
/// # Errors
///
/// Returns [`CodecError::InvalidEnvelope`] for JSON that is neither a
/// one-element success array with an `i32` nor a three-element error array.
pub fn decode_outcome(buf: &[u8]) -> Result<Outcome, CodecError> {
    if buf.iter().all(u8::is_ascii_whitespace) {
        return Ok(Outcome::NotImplemented);
    }

    let value: Value = serde_json::from_slice(buf)?;
    let Value::Array(items) = value else {
        return Err(CodecError::InvalidEnvelope("expected a JSON array".to_string()));
    };

    match items.as_slice() {
        [value] => value
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(Outcome::Success)
            .ok_or_else(|| {
                CodecError::InvalidEnvelope(format!("success value is not an i32: {value}"))
            }),
        [code, message, _details] => {
            let code = code
                .as_str()
                .ok_or_else(|| CodecError::InvalidEnvelope("error code is not a string".to_string()))?;
            let message = match message {
                Value::Null => String::new(),
                Value::String(s) => s.clone(),
                other => {
                    return Err(CodecError::InvalidEnvelope(format!(
                        "error message is not a string: {other}"
                    )));
                }
            };
            Ok(Outcome::Failure {
                code: code.to_string(),
                message,
            })
        }
        _ => Err(CodecError::InvalidEnvelope(format!(
            "unexpected envelope length {}",
            items.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_call_without_args() {
        let call = decode_method_call(br#"{"method":"getWifiRssiDbm"}"#).unwrap();
        assert_eq!(call, MethodCall::new("getWifiRssiDbm"));

        let call = decode_method_call(br#"{"method":"getWifiRssiDbm","args":null}"#).unwrap();
        assert!(call.arguments().is_none());
    }

    #[test]
    fn test_decode_call_with_args() {
        let call = decode_method_call(br#"{"method":"setLevel","args":{"level":3}}"#).unwrap();
        assert_eq!(call.name(), "setLevel");
        assert_eq!(call.arguments(), Some(&json!({"level": 3})));
    }

    #[test]
    fn test_decode_call_rejects_bad_shapes() {
        assert!(matches!(decode_method_call(b"not json"), Err(CodecError::Json(_))));
        assert!(matches!(decode_method_call(br#"{"args":1}"#), Err(CodecError::Json(_))));
        assert!(matches!(decode_method_call(br#"{"method":7}"#), Err(CodecError::Json(_))));
    }

    #[test]
    fn test_encode_call() {
        let bytes = encode_method_call(&MethodCall::new("getWifiRssiDbm")).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, json!({"method": "getWifiRssiDbm", "args": null}));
    }

    #[test]
    fn test_encode_success() {
        assert_eq!(encode_outcome(&Outcome::Success(-55)).unwrap(), b"[-55]");
    }

    #[test]
    fn test_encode_failure() {
        let bytes = encode_outcome(&Outcome::failure("permission denied")).unwrap();
        assert_eq!(bytes, br#"["ERR","permission denied",null]"#);

        let bytes = encode_outcome(&Outcome::failure("")).unwrap();
        assert_eq!(bytes, br#"["ERR",null,null]"#);
    }

    #[test]
    fn test_encode_not_implemented_is_empty() {
        assert!(encode_outcome(&Outcome::NotImplemented).unwrap().is_empty());
    }

    #[test]
    fn test_decode_outcomes() {
        assert_eq!(decode_outcome(b"[-127]").unwrap(), Outcome::Success(-127));
        assert_eq!(decode_outcome(b"").unwrap(), Outcome::NotImplemented);
        assert_eq!(decode_outcome(b" \n").unwrap(), Outcome::NotImplemented);
        assert_eq!(
            decode_outcome(br#"["ERR",null,null]"#).unwrap(),
            Outcome::failure("")
        );
        assert_eq!(
            decode_outcome(br#"["ERR","boom",{"extra":true}]"#).unwrap(),
            Outcome::failure("boom")
        );
    }

    #[test]
    fn test_decode_outcome_rejects_bad_envelopes() {
        for bad in [
            &b"{}"[..],
            &b"[]"[..],
            &b"[1,2]"[..],
            &b"[\"-55\"]"[..],
            &b"[4294967296]"[..],
            &b"[1,\"m\",null]"[..],
            &b"[\"ERR\",5,null]"[..],
        ] {
            assert!(
                matches!(decode_outcome(bad), Err(CodecError::InvalidEnvelope(_))),
                "accepted {}",
                String::from_utf8_lossy(bad)
            );
        }
    }
}
