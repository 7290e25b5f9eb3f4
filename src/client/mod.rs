pub mod doubt_solver;
pub mod response_parser;

use async_trait::async_trait;

use crate::errors::ChatError;
use crate::models::DoubtRequest;
use crate::session::SessionContext;
use crate::stream::DeltaStream;

pub use doubt_solver::DoubtSolverClient;

/// Anything that can answer a doubt as a stream of text deltas.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Resolves once the response headers are in. Failures before the body
    /// starts streaming are reported here, never through the stream.
    async fn stream_answer(
        &self,
        ctx: &SessionContext,
        request: &DoubtRequest,
    ) -> Result<DeltaStream, ChatError>;
}
