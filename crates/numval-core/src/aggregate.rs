use crate::domain::ValidationResponse;
use crate::error::CoreError;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailLevel {
    #[default]
    Full,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterPolicy {
    #[default]
    All,
    InvalidOnly,
}

/// Equivalent AWS CLI invocation for a number, for reproducing a lookup by hand.
pub fn aws_cli_command(number: &str) -> String {
    format!("aws pinpoint phone-number-validate --number-validate-request PhoneNumber={number}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResultItem {
    Full {
        #[serde(rename = "NumberValidateResponse")]
        response: ValidationResponse,
        #[serde(rename = "AwsCliCommand")]
        aws_cli_command: String,
    },
    Summary {
        #[serde(rename = "PhoneNumber")]
        phone_number: String,
        #[serde(rename = "AwsCliCommand")]
        aws_cli_command: String,
    },
}

impl ResultItem {
    fn from_response(detail: DetailLevel, response: ValidationResponse) -> Self {
        let aws_cli_command = aws_cli_command(response.original_number());
        match detail {
            DetailLevel::Full => ResultItem::Full {
                response,
                aws_cli_command,
            },
            DetailLevel::Summary => ResultItem::Summary {
                phone_number: response.original_number().to_string(),
                aws_cli_command,
            },
        }
    }

    pub fn phone_number(&self) -> &str {
        match self {
            ResultItem::Full { response, .. } => response.original_number(),
            ResultItem::Summary { phone_number, .. } => phone_number,
        }
    }

    pub fn aws_cli_command(&self) -> &str {
        match self {
            ResultItem::Full {
                aws_cli_command, ..
            }
            | ResultItem::Summary {
                aws_cli_command, ..
            } => aws_cli_command,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AggregateView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    valid: Option<&'a [ResultItem]>,
    invalid: &'a [ResultItem],
}

/// Collects validation responses for one run and renders them as JSON.
///
/// The valid bucket only exists under [`FilterPolicy::All`]; with
/// [`FilterPolicy::InvalidOnly`] valid responses are dropped on arrival and
/// the rendered object has no `Valid` key.
#[derive(Debug, Clone)]
pub struct Aggregator {
    detail: DetailLevel,
    filter: FilterPolicy,
    valid: Option<Vec<ResultItem>>,
    invalid: Vec<ResultItem>,
}

impl Aggregator {
    pub fn new(detail: DetailLevel, filter: FilterPolicy) -> Self {
        let valid = match filter {
            FilterPolicy::All => Some(Vec::new()),
            FilterPolicy::InvalidOnly => None,
        };
        Self {
            detail,
            filter,
            valid,
            invalid: Vec::new(),
        }
    }

    pub fn detail(&self) -> DetailLevel {
        self.detail
    }

    pub fn filter(&self) -> FilterPolicy {
        self.filter
    }

    pub fn valid(&self) -> Option<&[ResultItem]> {
        self.valid.as_deref()
    }

    pub fn invalid(&self) -> &[ResultItem] {
        &self.invalid
    }

    pub fn add(&mut self, response: ValidationResponse) {
        if response.is_invalid() {
            self.invalid.push(ResultItem::from_response(self.detail, response));
            return;
        }

        if let Some(valid) = self.valid.as_mut() {
            valid.push(ResultItem::from_response(self.detail, response));
        }
    }

    /// Tab-indented JSON object of the collected buckets.
    pub fn result(&self) -> Result<String, CoreError> {
        let view = AggregateView {
            valid: self.valid.as_deref(),
            invalid: &self.invalid,
        };
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
        view.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
