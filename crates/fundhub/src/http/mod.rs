//! HTTP layer: request descriptors, interceptors, responses and error
//! classification.

pub use classifier::ErrorClassifier;
pub use interceptor::{
    BearerToken, InterceptorChain, InterceptorError, Passthrough, RequestInterceptor,
    RequestTracing,
};
pub use multipart::{DEFAULT_FILE_FIELD, FilePart, UploadOptions, UploadPayload};
pub use request::{RequestBody, RequestDescriptor, ResponseKind, encode_path_segment};
pub use response::{BlobResponse, Payload, ResponseEnvelope};

pub mod classifier;
pub mod interceptor;
mod multipart;
mod request;
mod response;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
