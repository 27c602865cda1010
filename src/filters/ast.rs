use std::fmt;

/// Columns a filter can test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Country,
    Region,
    Income,
}

impl FilterField {
    pub const ALL: [FilterField; 3] = [FilterField::Country, FilterField::Region, FilterField::Income];

    /// Frame column this field reads
    pub fn column(self) -> &'static str {
        match self {
            FilterField::Country => "Country",
            FilterField::Region => "Region",
            FilterField::Income => "Income",
        }
    }

    /// Name used in filter expressions
    pub fn keyword(self) -> &'static str {
        match self {
            FilterField::Country => "country",
            FilterField::Region => "region",
            FilterField::Income => "income",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    And,
    Or,
}

/// `field:value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: FilterField,
    pub value: String,
}

impl FieldFilter {
    pub fn new(field: FilterField, value: impl Into<String>) -> Self {
        Self { field, value: value.into() }
    }
}

impl fmt::Display for FieldFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value.chars().any(char::is_whitespace) {
            write!(f, "{}:\"{}\"", self.field.keyword(), self.value)
        } else {
            write!(f, "{}:{}", self.field.keyword(), self.value)
        }
    }
}

/// A flat chain of filters evaluated left to right
///
/// Each filter after the first carries the operator joining it to everything before it,
/// so `a OR b AND c` means `(a OR b) AND c`. There is no grouping syntax.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterExpr {
    first: Option<FieldFilter>,
    rest: Vec<(FilterOperator, FieldFilter)>,
}

impl FilterExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a chain with a single filter
    pub fn single(filter: FieldFilter) -> Self {
        Self { first: Some(filter), rest: Vec::new() }
    }

    /// Extend the chain; on an empty chain the operator is ignored
    pub fn push(&mut self, operator: FilterOperator, filter: FieldFilter) {
        if self.first.is_none() {
            self.first = Some(filter);
        } else {
            self.rest.push((operator, filter));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    pub fn len(&self) -> usize {
        self.first.iter().count() + self.rest.len()
    }

    pub fn first(&self) -> Option<&FieldFilter> {
        self.first.as_ref()
    }

    pub fn rest(&self) -> &[(FilterOperator, FieldFilter)] {
        &self.rest
    }

    /// All filters in order, without their operators
    pub fn filters(&self) -> impl Iterator<Item = &FieldFilter> {
        self.first.iter().chain(self.rest.iter().map(|(_, f)| f))
    }

    /// Operators in order; one fewer than the filters
    pub fn operators(&self) -> impl Iterator<Item = FilterOperator> + '_ {
        self.rest.iter().map(|(op, _)| *op)
    }
}

impl fmt::Display for FilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = &self.first else {
            return Ok(());
        };
        write!(f, "{}", first)?;
        for (op, filter) in &self.rest {
            let word = match op {
                FilterOperator::And => "AND",
                FilterOperator::Or => "OR",
            };
            write!(f, " {} {}", word, filter)?;
        }
        Ok(())
    }
}
