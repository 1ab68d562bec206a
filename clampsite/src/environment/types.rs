use clampsite_core_contact_impl::ContactFeatureServiceImpl;
use clampsite_core_search_impl::SearchFeatureServiceImpl;
use clampsite_email_impl::EmailServiceImpl;

pub type RestServer = clampsite_api_rest::RestServer<ContactFeature, SearchFeature>;

pub type Email = EmailServiceImpl;

pub type ContactFeature = ContactFeatureServiceImpl<Email>;
pub type SearchFeature = SearchFeatureServiceImpl;
