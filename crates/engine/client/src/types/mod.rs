//! Engine API data model.

mod block;
pub use block::{BlockTransactions, ExecutionBlock};

mod forkchoice;
pub use forkchoice::{ForkchoiceState, ForkchoiceUpdated, PayloadAttributesV1};

mod payload;
pub use payload::{ExecutionPayloadV1, MAX_EXTRA_DATA_BYTES, PayloadId};

mod status;
pub use status::{PayloadStatus, PayloadStatusEnum};

mod transition;
pub use transition::TransitionConfiguration;
