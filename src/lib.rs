//! Typed async transport for the Amadeus travel APIs: cached client-credentials tokens,
//! uniform request dispatch, and link-based pagination shared by every resource namespace.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod pagination;
pub mod resources;

pub use client::{Client, RequestDescriptor, Response};
pub use config::{ClientConfig, Credentials};
pub use error::{Error, Result};
pub use pagination::{Page, PageLinks, PageMeta, PageRelation, Paginated};

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::OnceCell as AsyncOnceCell;
	pub use parking_lot::{Mutex, RwLock};
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError, Method};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
