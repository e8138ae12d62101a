use rosc::{OscMessage, OscType};
use thiserror::Error;

/// Error types that can occur when decoding avatar parameter arguments
#[derive(Debug, Error)]
pub enum ArgError {
    #[error("unexpected boolean encoding: {0}")]
    MalformedArgument(String),

    #[error("no arguments in OSC message")]
    MissingArgument,

    #[error("first argument in OSC message is not an integer")]
    TypeMismatch,
}

pub type Result<T> = std::result::Result<T, ArgError>;

/// Decode a boolean avatar parameter.
///
/// The VR client encodes booleans as the distinct OSC true/false type tags
/// rather than as an integer payload, so anything that is not one of the
/// two tags is malformed.
pub fn parse_bool(msg: &OscMessage) -> Result<bool> {
    match msg.args.first() {
        Some(OscType::Bool(value)) => Ok(*value),
        _ => Err(ArgError::MalformedArgument(format!("{:?}", msg.args))),
    }
}

/// Decode a continuous avatar parameter from the final argument.
///
/// Accepts float, double and integer arguments; proximity senders have been
/// observed using all three shapes.
pub fn parse_float(msg: &OscMessage) -> Result<f64> {
    match msg.args.last() {
        Some(OscType::Float(value)) => Ok(*value as f64),
        Some(OscType::Double(value)) => Ok(*value),
        Some(OscType::Int(value)) => Ok(*value as f64),
        _ => Err(ArgError::MalformedArgument(format!("{:?}", msg.args))),
    }
}

/// Decode an integer avatar parameter from the first argument.
pub fn parse_int(msg: &OscMessage) -> Result<i32> {
    match msg.args.first() {
        None => Err(ArgError::MissingArgument),
        Some(OscType::Int(value)) => Ok(*value),
        Some(_) => Err(ArgError::TypeMismatch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(args: Vec<OscType>) -> OscMessage {
        OscMessage {
            addr: "/avatar/parameters/test".to_string(),
            args,
        }
    }

    #[test]
    fn test_parse_bool_roundtrip() {
        for value in [true, false] {
            let msg = message(vec![OscType::Bool(value)]);
            assert_eq!(parse_bool(&msg).unwrap(), value);
        }
    }

    #[test]
    fn test_parse_bool_rejects_other_encodings() {
        assert!(matches!(
            parse_bool(&message(vec![OscType::Int(1)])),
            Err(ArgError::MalformedArgument(_))
        ));
        assert!(matches!(
            parse_bool(&message(vec![])),
            Err(ArgError::MalformedArgument(_))
        ));
        assert!(matches!(
            parse_bool(&message(vec![OscType::String("true".to_string())])),
            Err(ArgError::MalformedArgument(_))
        ));
    }

    #[test]
    fn test_parse_float_takes_last_argument() {
        let msg = message(vec![OscType::Int(3), OscType::Float(0.25)]);
        assert_eq!(parse_float(&msg).unwrap(), 0.25);
    }

    #[test]
    fn test_parse_float_accepts_numeric_shapes() {
        assert_eq!(parse_float(&message(vec![OscType::Double(0.5)])).unwrap(), 0.5);
        assert_eq!(parse_float(&message(vec![OscType::Int(1)])).unwrap(), 1.0);
    }

    #[test]
    fn test_parse_float_rejects_non_numeric() {
        assert!(matches!(
            parse_float(&message(vec![OscType::String("0.5".to_string())])),
            Err(ArgError::MalformedArgument(_))
        ));
        assert!(parse_float(&message(vec![])).is_err());
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int(&message(vec![OscType::Int(2)])).unwrap(), 2);
    }

    #[test]
    fn test_parse_int_missing_argument() {
        assert!(matches!(parse_int(&message(vec![])), Err(ArgError::MissingArgument)));
    }

    #[test]
    fn test_parse_int_type_mismatch() {
        assert!(matches!(
            parse_int(&message(vec![OscType::Float(2.0)])),
            Err(ArgError::TypeMismatch)
        ));
    }
}
