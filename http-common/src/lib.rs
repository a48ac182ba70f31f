// Copyright (c) Microsoft. All rights reserved.

#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
	clippy::missing_errors_doc,
	clippy::module_name_repetitions,
)]

mod request;
pub use request::{HttpRequest, HttpResponse};

/// Ref <https://url.spec.whatwg.org/#path-percent-encode-set>
pub const PATH_SEGMENT_ENCODE_SET: &percent_encoding::AsciiSet =
	&percent_encoding::CONTROLS
	.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`') // fragment percent-encode set
	.add(b'#').add(b'?').add(b'{').add(b'}') // path percent-encode set
	.add(b'/').add(b'%'); // a single segment must not introduce a separator or an escape
