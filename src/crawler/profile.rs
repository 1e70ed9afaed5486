//! Profile page parser
//!
//! Profile pages render each field in a fixed, class-tagged `<div>`. Most
//! rows read `Label: value`, in which case only the value is kept. The email
//! address is obfuscated and decoded with [`decode_cf_email`].

use crate::crawler::email::{decode_cf_email, EmailDecodeError};
use crate::model::ProfileRecord;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

const NAME_SELECTOR: &str = "div.userFullName";
const GENDER_AGE_SELECTOR: &str = "div.userGenderAndAge.userRowGeneral";
const PHONE_SELECTOR: &str = "div.userPhoneNumber.userRowGeneral";
const EMAIL_SELECTOR: &str = "span.__cf_email__[data-cfemail]";
const EDUCATION_SELECTOR: &str = "div.userEducation.userRowGeneral";
/// Shared by the experience, city and teaching location rows, in that order
const TEACHING_ROW_SELECTOR: &str = "div.userTeachingExp.userRowGeneral";
const ABOUT_ME_SELECTOR: &str = "div.userAboutMe.userRowGeneral span.userRowValue";

/// Reasons a profile page could not be turned into a record
#[derive(Debug, Error)]
pub enum ProfileParseError {
    #[error("missing {field} element ({selector})")]
    MissingElement {
        field: &'static str,
        selector: &'static str,
    },

    #[error("{field} row has no 'Label: value' separator: {text:?}")]
    MissingLabel { field: &'static str, text: String },

    #[error("undecodable email: {0}")]
    Email(#[from] EmailDecodeError),

    #[error("invalid selector: {0}")]
    InvalidSelector(&'static str),
}

/// Parses a profile page into a [`ProfileRecord`]
///
/// # Errors
///
/// Fails when any of the nine fields cannot be located, when a labelled row
/// lacks its colon, or when the obfuscated email is malformed.
pub fn parse_profile(html: &str) -> Result<ProfileRecord, ProfileParseError> {
    let document = Html::parse_document(html);

    let name = element_text(&document, NAME_SELECTOR, 0, "Name")?;
    let gender_age = element_text(&document, GENDER_AGE_SELECTOR, 0, "Gender and Age")?;
    let contact = labelled_value(&document, PHONE_SELECTOR, 0, "Contact")?;
    let email = decode_email(&document)?;
    let education = labelled_value(&document, EDUCATION_SELECTOR, 0, "Education")?;
    let experience = labelled_value(&document, TEACHING_ROW_SELECTOR, 0, "Experience")?;
    let city = labelled_value(&document, TEACHING_ROW_SELECTOR, 1, "City")?;
    let teaching_location =
        labelled_value(&document, TEACHING_ROW_SELECTOR, 2, "Teaching Location")?;
    let about_me = element_text(&document, ABOUT_ME_SELECTOR, 0, "About Me")?;

    Ok(ProfileRecord {
        name,
        gender_age,
        contact,
        email,
        education,
        experience,
        city,
        teaching_location,
        about_me,
    })
}

fn selector(css: &'static str) -> Result<Selector, ProfileParseError> {
    Selector::parse(css).map_err(|_| ProfileParseError::InvalidSelector(css))
}

/// Finds the `index`-th element matching `css`
fn nth_element<'a>(
    document: &'a Html,
    css: &'static str,
    index: usize,
    field: &'static str,
) -> Result<ElementRef<'a>, ProfileParseError> {
    let selector = selector(css)?;
    document
        .select(&selector)
        .nth(index)
        .ok_or(ProfileParseError::MissingElement {
            field,
            selector: css,
        })
}

/// Returns the trimmed text content of the `index`-th element matching `css`
fn element_text(
    document: &Html,
    css: &'static str,
    index: usize,
    field: &'static str,
) -> Result<String, ProfileParseError> {
    let element = nth_element(document, css, index, field)?;
    Ok(element.text().collect::<String>().trim().to_string())
}

/// Returns the value part of a `Label: value` row
fn labelled_value(
    document: &Html,
    css: &'static str,
    index: usize,
    field: &'static str,
) -> Result<String, ProfileParseError> {
    let element = nth_element(document, css, index, field)?;
    let text = element.text().collect::<String>();

    split_label(&text).ok_or_else(|| ProfileParseError::MissingLabel {
        field,
        text: text.trim().to_string(),
    })
}

/// Returns the trimmed text between the first colon and the next one
fn split_label(text: &str) -> Option<String> {
    text.split(':').nth(1).map(|value| value.trim().to_string())
}

fn decode_email(document: &Html) -> Result<String, ProfileParseError> {
    let element = nth_element(document, EMAIL_SELECTOR, 0, "Email")?;
    let encoded = element
        .value()
        .attr("data-cfemail")
        .ok_or(ProfileParseError::MissingElement {
            field: "Email",
            selector: EMAIL_SELECTOR,
        })?;

    Ok(decode_cf_email(encoded)?)
}
