// Prompt fragments shared by the scoring backends. The marker format each
// prompt asks for is part of that backend's extraction contract; changing
// one without the other breaks scoring.

/// System prompt sent to every model backend.
pub const SCORING_SYSTEM_PROMPT: &str =
    "You are a helpful assistant who scores resumes on a scale of 0-100.";

/// Llama-3 chat template used by the Replicate backend.
pub const LLAMA_PROMPT_TEMPLATE: &str = "<|begin_of_text|><|start_header_id|>system<|end_header_id|>\n\nYou are a helpful assistant<|eot_id|><|start_header_id|>user<|end_header_id|>\n\n{prompt}<|eot_id|><|start_header_id|>assistant<|end_header_id|>\n\n";

/// End-of-turn stop sequences for the Llama backend.
pub const LLAMA_STOP_SEQUENCES: &str = "<|end_of_text|>,<|eot_id|>";
