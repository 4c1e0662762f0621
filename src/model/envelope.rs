//! Response envelopes shared by every endpoint.

// self
use crate::_prelude::*;

/// Standard success wrapper; the client hands back only [`Envelope::data`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
	/// Endpoint payload.
	pub data: T,
	/// Optional human-readable note from the backend.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	/// Backend success flag.
	#[serde(default)]
	pub success: bool,
}

/// One page of a listing endpoint, carried inside an [`Envelope`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
	/// Items on this page.
	pub data: Vec<T>,
	/// Page position and totals.
	pub pagination: Pagination,
}
impl<T> Paginated<T> {
	/// Returns `true` when a later page exists.
	pub fn has_next_page(&self) -> bool {
		self.pagination.page < self.pagination.total_pages
	}
}

/// Pagination metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
	/// 1-based page number.
	pub page: u32,
	/// Page size.
	pub limit: u32,
	/// Total number of items.
	pub total: u64,
	/// Total number of pages.
	pub total_pages: u32,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn paginated_payload_nests_inside_envelope() {
		let raw = r#"{
			"success": true,
			"data": {
				"data": [1, 2, 3],
				"pagination": { "page": 1, "limit": 3, "total": 7, "totalPages": 3 }
			}
		}"#;
		let envelope: Envelope<Paginated<u8>> =
			serde_json::from_str(raw).expect("Paginated envelope should decode.");

		assert_eq!(envelope.data.data, vec![1, 2, 3]);
		assert_eq!(envelope.data.pagination.total_pages, 3);
		assert!(envelope.data.has_next_page());
		assert!(envelope.message.is_none());
	}

	#[test]
	fn missing_flags_default() {
		let envelope: Envelope<Option<String>> =
			serde_json::from_str("{}").expect("Envelope without members should decode.");

		assert_eq!(envelope.data, None);
		assert!(!envelope.success);
	}
}
