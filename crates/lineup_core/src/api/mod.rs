//! JSON facade for UI hosts and the CLI.

pub mod json_api;

pub use json_api::{
    candidates_json, command_schema_json, error_codes, formations_json, run_script_json,
    validate_json, CandidatesRequest, ScriptRequest, ScriptResponse, ScriptStep,
};
