//! JSON test vector loader shared by the envelope tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::fs;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TestVector {
    pub description: String,
    pub frame: FrameData,
    #[serde(default)]
    pub expect: Option<serde_json::Value>,
    #[serde(default)]
    pub expect_error: Option<ExpectError>,
}

#[derive(Debug, Deserialize)]
pub struct ExpectError {
    pub code: String,
}

/// Wire text, either inline or as a JSON value to be serialized.
#[derive(Debug, Deserialize)]
pub struct FrameData {
    pub encoding: String,
    pub data: serde_json::Value,
}

impl FrameData {
    pub fn text(&self) -> String {
        match self.encoding.as_str() {
            "raw" => self.data.as_str().expect("raw frame must be a string").to_string(),
            "json" => self.data.to_string(),
            other => panic!("unsupported encoding: {other}"),
        }
    }
}

pub fn load(name: &str) -> TestVector {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}
