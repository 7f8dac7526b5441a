//! [`MecWork`] -> element tree.
//!
//! Layout follows the MovieLabs MEC v2.6 CoreMetadata structure the partner
//! ingests. Children are declared in output order.

use super::tree::Element;
use super::{MD_NAMESPACE, MDMEC_NAMESPACE, SCHEMA_LOCATION, XSI_NAMESPACE};
use crate::models::{ArtReference, Credit, LocalizedInfo, MecWork, ParentLink, Rating};

/// Assemble the `mdmec:CoreMetadata` document for `work`.
pub fn build_tree(work: &MecWork) -> Element {
    Element::new("mdmec:CoreMetadata")
        .attr("xmlns:xsi", XSI_NAMESPACE)
        .attr("xmlns:md", MD_NAMESPACE)
        .attr("xmlns:mdmec", MDMEC_NAMESPACE)
        .attr("xsi:schemaLocation", SCHEMA_LOCATION)
        .child(basic(work))
        .child(
            Element::new("mdmec:CompanyDisplayCredit").child(
                Element::new("md:DisplayString")
                    .attr("language", "en-US")
                    .text(work.display_string.as_str()),
            ),
        )
}

fn basic(work: &MecWork) -> Element {
    Element::new("mdmec:Basic")
        .attr("ContentID", work.content_id.as_str())
        .children(work.localized.iter().map(localized_info))
        .child(Element::new("md:ReleaseYear").text(work.release_year.as_str()))
        .child(Element::new("md:ReleaseDate").text(work.release_date.as_str()))
        .child(Element::new("md:WorkType").text(work.work_type_text.as_str()))
        .child(
            Element::new("md:AltIdentifier")
                .child(Element::new("md:Namespace").text("ORG"))
                .child(Element::new("md:Identifier").text(work.alt_id.as_str())),
        )
        .child(Element::new("md:RatingSet").children(work.ratings.iter().map(rating)))
        .children(work.credits.iter().map(people))
        .child(Element::new("md:OriginalLanguage").text(work.original_language.as_str()))
        .child(
            Element::new("md:AssociatedOrg")
                .attr("organizationID", work.org_id.as_str())
                .attr("role", "licensor"),
        )
        .child_opt(work.sequence_number.as_deref().map(|number| {
            Element::new("md:SequenceInfo").child(Element::new("md:Number").text(number))
        }))
        .child_opt(work.parent.as_ref().map(parent))
}

fn localized_info(info: &LocalizedInfo) -> Element {
    Element::new("md:LocalizedInfo")
        .attr("language", info.language.as_str())
        .child(Element::new("md:TitleDisplayUnlimited").text(info.title.as_str()))
        .child(Element::new("md:TitleSort"))
        .children(info.art.iter().map(art_reference))
        .child(Element::new("md:Summary190").text(info.summary_190.as_str()))
        .child(Element::new("md:Summary400").text(info.summary_400.as_str()))
        .children(
            info.genres
                .iter()
                .map(|id| Element::new("md:Genre").attr("id", id.as_str()).text(" ")),
        )
}

fn art_reference(art: &ArtReference) -> Element {
    Element::new("md:ArtReference")
        .attr("resolution", art.resolution)
        .attr("purpose", art.kind.as_str())
        .text(art.value.as_str())
}

fn rating(rating: &Rating) -> Element {
    Element::new("md:Rating")
        .child(
            Element::new("md:Region")
                .child(Element::new("md:country").text(rating.country.as_str())),
        )
        .child(Element::new("md:System").text(rating.system.as_str()))
        .child(Element::new("md:Value").text(rating.value.as_str()))
}

fn people(credit: &Credit) -> Element {
    Element::new("md:People")
        .child(
            Element::new("md:Job")
                .child(Element::new("md:JobFunction").text(credit.job_function.as_str()))
                .child(
                    Element::new("md:BillingBlockOrder").text(credit.billing_order.to_string()),
                ),
        )
        .child(
            Element::new("md:Name").children(credit.names.iter().map(|n| {
                Element::new("md:DisplayName")
                    .attr("language", n.language.as_str())
                    .text(n.name.as_str())
            })),
        )
}

fn parent(link: &ParentLink) -> Element {
    Element::new("md:Parent")
        .attr("relationshipType", link.relationship)
        .child(Element::new("md:ParentContentID").text(link.content_id.as_str()))
}
