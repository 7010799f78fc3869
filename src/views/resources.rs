//! Static resource pages: finance forms, operations resources, contact details.

use super::{copy_button, escape};

pub const TECH_EMAIL: &str = "tech@usstm.ca";
pub const OPERATIONS_EMAIL: &str = "vp.operations@usstm.ca";

const INSTAGRAM: &str = "https://instagram.com/usstorontomet";
const WEBSITE: &str = "https://usstm.ca";
const LINKTREE: &str = "https://linktr.ee/usstorontomet";

pub struct ResourceLink {
    pub name: &'static str,
    pub url: &'static str,
    pub description: &'static str,
}

pub const FINANCE_FORMS: [ResourceLink; 5] = [
    ResourceLink {
        name: "Budget Request Template",
        url: "https://docs.google.com/spreadsheets/d/1nv6X_KiiyQVGBtFCUSAApTB9GCCBoOvMehxbx2q3rDw/edit?gid=0#gid=0",
        description: "Submit the budget request template to the finance team for review and approval of your projected expenses for the semester or year.",
    },
    ResourceLink {
        name: "Reimbursement Request Form",
        url: "https://form.asana.com/?k=ai-l-z8VFWXA5p6GWsjGnA&d=1207498115170020",
        description: "Request reimbursement for out-of-pocket expenses incurred on behalf of USSTM.",
    },
    ResourceLink {
        name: "Internal Invoices Form",
        url: "https://form.asana.com/?k=1NQgBEjWG1VBGSkzSBK0hA&d=1207498115170020",
        description: "Submit this form for internal transactions within TMU that require invoicing and don't currently have an invoice.",
    },
    ResourceLink {
        name: "External Invoices Form",
        url: "https://form.asana.com/?k=PzlZ-m9kEK2CvwGxs6Y0cg&d=1207498115170020",
        description: "Submit this form for external transactions that require invoicing and don't currently have an invoice.",
    },
    ResourceLink {
        name: "P-Card Request Form",
        url: "https://form.asana.com/?k=QT1kvTNB3yNyBEZY0wDjUA&d=1207498115170020",
        description: "Request use of the purchasing card (P-Card) for approved transactions so USSTM purchases it on your behalf.",
    },
];

pub const OPERATIONS_RESOURCES: [ResourceLink; 4] = [
    ResourceLink {
        name: "Resource Sheet",
        url: "https://docs.google.com/spreadsheets/d/1Qa1UsFtjEiqlM6eEtCvIqwAfujF_u0-C/edit?usp=sharing&ouid=107751479446945748540&rtpof=true&sd=true",
        description: "Access the comprehensive list of general event supplies USSTM offers including cups, garbage bags, plates, utensils, media services, carts, tables, and chairs.",
    },
    ResourceLink {
        name: "Event Supplies & Request Form",
        url: "https://docs.google.com/forms/d/e/1FAIpQLSdQdvJO6K7V5Q6g5a7EBl_Oq86uMi7MH7052iAKzHPnqC12aQ/viewform",
        description: "Request supplies available for sign-out only, including craft supplies, board games, decorations, and more. Please specify the quantity you will be borrowing.",
    },
    ResourceLink {
        name: "Science Lounge Booking Form",
        url: "https://form.asana.com/?k=FNNzzwHAohuUc_jfYcWS3w&d=1207498115170020",
        description: "Request to book the Science Lounge for your group's events. Each student group may only book the space for a max of 2 times per month. Requests must be made at least 1 week prior to the event date.",
    },
    ResourceLink {
        name: "Graphics Request Form",
        url: "https://form.asana.com/?k=PvdgW4DrqC5iuVA7TnHZow&d=1207498115170020",
        description: "Request graphics to be made for social media purposes. Requests must be made at least 10 days in advance with enough information to create your graphic.",
    },
];

/// A list of external links, each with an expandable description.
pub fn resource_list(heading: &str, id: &str, links: &[ResourceLink]) -> String {
    let items: String = links
        .iter()
        .map(|link| {
            format!(
                r#"<li>
  <a class="resource-link" href="{url}" target="_blank" rel="noopener noreferrer">{name}</a>
  <details class="resource-info"><summary aria-label="Toggle description for {name}">Info</summary><p>{description}</p></details>
</li>"#,
                url = escape(link.url),
                name = escape(link.name),
                description = escape(link.description),
            )
        })
        .collect();

    format!(
        r#"<section class="card narrow">
  <h1>{heading}</h1>
  <ul id="{id}" class="resources">{items}</ul>
</section>"#,
        heading = escape(heading),
        id = id,
        items = items,
    )
}

pub fn finance_page() -> String {
    resource_list("USSTM Finance Forms (2025–2026)", "finance", &FINANCE_FORMS)
}

pub fn operations_page() -> String {
    resource_list(
        "USSTM Operations Resources (2025–2026)",
        "operations",
        &OPERATIONS_RESOURCES,
    )
}

fn external(label: &str, href: &str, text: &str) -> String {
    format!(
        r#"<div class="contact-row"><span class="label">{}</span><a href="{}" target="_blank" rel="noopener noreferrer">{}</a></div>"#,
        label, href, text
    )
}

pub fn contact_page() -> String {
    format!(
        r#"<section class="card narrow">
  <h1>Contact Us</h1>
  <p>We&#39;re here to help! If you have any questions, feedback, or need assistance, please don&#39;t hesitate to reach out.
  Our team is dedicated to providing you with the support you need, whether you&#39;re a current member or simply interested in learning more about USSTM.
  Feel free to connect with us through any of the channels below. We look forward to hearing from you and will respond as soon as possible.</p>
  <div class="stack">
    <div class="contact-row"><span class="label">Email</span>{email}</div>
    {instagram}
    {website}
    {linktree}
  </div>
</section>"#,
        email = copy_button(OPERATIONS_EMAIL, "email address"),
        instagram = external("Instagram", INSTAGRAM, "@usstorontomet"),
        website = external("Website", WEBSITE, "usstm.ca"),
        linktree = external("Linktree", LINKTREE, "linktr.ee/usstorontomet"),
    )
}

pub fn dashboard_home(username: &str) -> String {
    format!(
        r#"<section class="card narrow">
  <h1>Dashboard</h1>
  <p>Welcome to your dashboard, {}!</p>
  <ul class="resources">
    <li><a class="resource-link" href="/dashboard/events">Events</a></li>
    <li><a class="resource-link" href="/dashboard/finance">Finance forms</a></li>
    <li><a class="resource-link" href="/dashboard/operations">Operations resources</a></li>
  </ul>
</section>"#,
        escape(username)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finance_links_open_in_new_tab() {
        let html = finance_page();
        assert_eq!(html.matches("<li>").count(), FINANCE_FORMS.len());
        assert!(html.contains(r#"target="_blank" rel="noopener noreferrer""#));
        assert!(html.contains("P-Card Request Form"));
    }

    #[test]
    fn test_operations_names_escaped() {
        let html = operations_page();
        assert!(html.contains("Event Supplies &amp; Request Form"));
        assert!(html.contains(r#"id="operations""#));
    }

    #[test]
    fn test_contact_page_channels() {
        let html = contact_page();
        assert!(html.contains(OPERATIONS_EMAIL));
        assert!(html.contains(INSTAGRAM));
        assert!(html.contains(LINKTREE));
    }
}
