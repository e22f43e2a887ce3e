//! Data structures for the Gemini API requests and streamed responses.

mod generation_config;
mod model_params;
mod part;
mod request;
mod request_type;
mod response;
mod stream;

pub use generation_config::{GenerationConfig, Modality};
pub use model_params::ModelParams;
pub use part::{Blob, Part};
pub use request::{Content, Request, Role};
pub use request_type::RequestType;
pub use response::{Candidate, CandidateContent, Response};
pub use stream::ResponseStream;
