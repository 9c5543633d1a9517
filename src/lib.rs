#![warn(clippy::all)]
pub(crate) mod any_or_list;
pub(crate) mod condition;
pub(crate) mod decode;
pub(crate) mod document;
pub(crate) mod effect;
pub(crate) mod error;
pub mod parser;
pub(crate) mod policy;
pub(crate) mod principal;
pub(crate) mod statement;
pub(crate) mod transform;

#[macro_use]
pub(crate) mod serutil;

pub use {
    any_or_list::{AnyOrList, Item},
    condition::{Condition, ConditionKey, ConditionOperation, Value, ValueList, ValueType},
    decode::{decode, DEFAULT_MAX_DECODE_PASSES},
    document::{Document, DocumentBuilder, DocumentBuilderError},
    effect::Effect,
    error::{DecodeError, ParseError, ParseErrorCategory, PolicyParserError},
    parser::{
        new_parser, AwsParser, ParserConstructor, ParserOptions, ParserOptionsBuilder, ParserOptionsBuilderError,
        ParserRegistry, ParserState, PolicyParser, Provider,
    },
    policy::{ConditionValues, Policy, PolicyBuilder, PolicyBuilderError, PolicyCondition},
    principal::{Principal, PrincipalEntry, PrincipalKind},
    statement::{Element, Statement},
    transform::{substitute_wildcards, transform, WILDCARD_MARKER},
};
