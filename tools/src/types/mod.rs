//! Type definitions for Ark tool resources
//!
//! Response shapes live in [`tool`]; caller inputs and wire payloads for
//! create/update live in [`request`].

pub mod request;
pub mod tool;

pub use request::{
    build_create_request, build_update_request, parse_input_schema, AgentRef,
    CreateToolRequest, HttpTarget, InputSchema, NewTool, ToolSpec, ToolSpecInput, ToolUpdate,
    UpdateToolRequest,
};
pub use tool::{Tool, ToolDetail, ToolDetailSpec, ToolListResponse};
