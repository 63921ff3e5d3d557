// SPDX-FileCopyrightText: 2026 Inquira Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt templates and template dispatch.
//!
//! Templates are `&'static str` with `{name}` placeholders; dispatch from
//! [`Category`] to a response template is an exhaustive match, so adding a
//! category without a template arm is a compile error.

use inquira_core::Category;

/// Identifies a prompt template plus, for responses, the category that
/// selects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateId {
    /// Rewrite a raw inquiry into a richer search query.
    ExpandQuery,
    /// Classify a raw inquiry into one of the canonical categories.
    Categorize,
    /// Answer an inquiry from retrieved context, phrased per category.
    Respond(Category),
}

const EXPAND_TEMPLATE: &str = "\
You are a real estate assistant. Your task is to clarify and expand the following real estate inquiry to make it more specific and searchable.

Original inquiry: \"{message}\"

Please provide a clearer, more detailed version of this inquiry that would help in finding relevant property information. Focus on:
- Property type and features
- Location preferences
- Budget considerations
- Specific needs or requirements

Expanded inquiry:
";

const CATEGORIZE_TEMPLATE: &str = "\
Classify the following real estate inquiry into exactly one of these categories:
- Price Inquiry
- Availability Check
- Schedule Visit
- Neighborhood Info
- Financing Question
- General Inquiry

Inquiry: \"{message}\"

Consider the main intent of the inquiry. Respond with only the category name.

Category:
";

const PRICE_TEMPLATE: &str = "\
You are a helpful real estate assistant specializing in pricing information.

Context from property database:
{context}

Customer inquiry: {question}

Please provide a comprehensive response about pricing, including:
- Current market prices for similar properties
- Price ranges and factors affecting pricing
- Payment options and financing considerations
- Value propositions

Response:
";

const AVAILABILITY_TEMPLATE: &str = "\
You are a helpful real estate assistant specializing in property availability.

Context from property database:
{context}

Customer inquiry: {question}

Please provide information about:
- Current availability status
- Timeline for availability
- Similar available properties
- Next steps for interested buyers

Response:
";

const VISIT_TEMPLATE: &str = "\
You are a helpful real estate assistant specializing in property viewings.

Context from property database:
{context}

Customer inquiry: {question}

Please provide information about:
- How to schedule a viewing
- What to expect during the visit
- Best times for viewings
- Preparation recommendations

Response:
";

const NEIGHBORHOOD_TEMPLATE: &str = "\
You are a helpful real estate assistant specializing in neighborhood information.

Context from property database:
{context}

Customer inquiry: {question}

Please provide comprehensive neighborhood information including:
- Local amenities and facilities
- Transportation options
- Safety and community features
- Lifestyle and demographics

Response:
";

const FINANCING_TEMPLATE: &str = "\
You are a helpful real estate assistant specializing in financing options.

Context from property database:
{context}

Customer inquiry: {question}

Please provide information about:
- Financing options available
- Loan requirements and processes
- Down payment considerations
- Monthly payment estimates

Response:
";

const GENERAL_TEMPLATE: &str = "\
You are a helpful real estate assistant providing general information.

Context from property database:
{context}

Customer inquiry: {question}

Please provide a comprehensive and helpful response based on the available information.

Response:
";

/// The template text for an identifier.
///
/// `Unknown` has no dedicated template and shares the general one.
pub fn template_text(id: TemplateId) -> &'static str {
    match id {
        TemplateId::ExpandQuery => EXPAND_TEMPLATE,
        TemplateId::Categorize => CATEGORIZE_TEMPLATE,
        TemplateId::Respond(category) => match category {
            Category::PriceInquiry => PRICE_TEMPLATE,
            Category::AvailabilityCheck => AVAILABILITY_TEMPLATE,
            Category::ScheduleVisit => VISIT_TEMPLATE,
            Category::NeighborhoodInfo => NEIGHBORHOOD_TEMPLATE,
            Category::FinancingQuestion => FINANCING_TEMPLATE,
            Category::GeneralInquiry | Category::Unknown => GENERAL_TEMPLATE,
        },
    }
}

/// Render a template, substituting each `{name}` placeholder.
pub fn render(id: TemplateId, vars: &[(&str, &str)]) -> String {
    let mut text = template_text(id).to_string();
    for (name, value) in vars {
        text = text.replace(&format!("{{{name}}}"), value);
    }
    text
}
