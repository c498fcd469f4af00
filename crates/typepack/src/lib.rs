//! `typepack` - a fixed registry of primitive binary Types.
//!
//! Every [`Type`] pairs a `write` that appends a canonical encoding to a
//! [`Writer`] with a `read` that rebuilds the value from a [`Reader`]. Types
//! are stateless; composing them into records is left to the caller, who
//! simply writes and reads them in sequence on the same buffer.
//!
//! ```
//! use typepack::{Path, Reader, Type, Value, Writer};
//!
//! let mut writer = Writer::new();
//! let root = Path::root();
//! Type::Uint.write(&Value::Uint(300), &mut writer, &root.key("id")).unwrap();
//! Type::Rgb.write(&Value::from("#111"), &mut writer, &root.key("color")).unwrap();
//! let bytes = writer.finalize();
//!
//! let mut reader = Reader::new(&bytes);
//! assert_eq!(Type::Uint.read(&mut reader).unwrap(), Value::Uint(300));
//! assert_eq!(Type::Rgb.read(&mut reader).unwrap(), Value::from("#111111"));
//! assert!(reader.exhausted());
//! ```

mod error;
mod path;
mod registry;
mod value;

pub mod types;

pub use error::{DecodeError, EncodeError, UnknownTypeError};
pub use path::Path;
pub use registry::Type;
pub use value::Value;

pub use types::color::{ParseColorError, Rgb, Rgba};
pub use types::object_id::{ObjectId, ParseObjectIdError};
pub use types::regex::RegexValue;

pub use typepack_buffers::{BufferError, Reader, Writer};
