use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::Collection;

use healer_core::error::{HealerError, HealerResult};
use healer_core::layer::Layer;

use crate::hierarchy::{
    plan_domain_add, plan_domain_edit, plan_subdomain_add, subdomains_update, DomainNode,
    DomainWrite,
};
use crate::json::id_to_string;
use crate::store::MongoStore;

impl MongoStore {
    fn domains(&self, database: &str, target: &str) -> Collection<DomainNode> {
        self.db(database).collection::<DomainNode>(target)
    }

    pub async fn target_exists(&self, database: &str, target: &str) -> HealerResult<bool> {
        self.collection_exists(database, target).await
    }

    pub async fn add_target(&self, database: &str, target: &str) -> HealerResult<()> {
        self.create_collection(database, target).await
    }

    pub async fn remove_target(&self, database: &str, target: &str) -> HealerResult<()> {
        self.drop_collection(database, target).await
    }

    async fn require_target(&self, database: &str, target: &str) -> HealerResult<()> {
        if !self.target_exists(database, target).await? {
            return Err(HealerError::not_found(Layer::Collection, target));
        }
        Ok(())
    }

    pub async fn domain_exists(
        &self,
        database: &str,
        target: &str,
        domain: &str,
    ) -> HealerResult<bool> {
        let count = self
            .domains(database, target)
            .count_documents(doc! { "domain": domain })
            .await
            .map_err(|e| HealerError::driver("checking domain", e))?;
        Ok(count > 0)
    }

    pub async fn find_domain(
        &self,
        database: &str,
        target: &str,
        domain: &str,
    ) -> HealerResult<Option<DomainNode>> {
        self.domains(database, target)
            .find_one(doc! { "domain": domain })
            .await
            .map_err(|e| HealerError::driver(format!("fetching domain '{domain}'"), e))
    }

    pub async fn get_domain(
        &self,
        database: &str,
        target: &str,
        domain: &str,
    ) -> HealerResult<DomainNode> {
        self.find_domain(database, target, domain)
            .await?
            .ok_or_else(|| HealerError::not_found(Layer::Document, domain))
    }

    /// Every domain document of a target, skipping marker documents.
    pub async fn list_domains(&self, database: &str, target: &str) -> HealerResult<Vec<DomainNode>> {
        let cursor = self
            .domains(database, target)
            .find(doc! { "domain": { "$type": "string" } })
            .await
            .map_err(|e| HealerError::driver("listing domains", e))?;
        cursor
            .try_collect()
            .await
            .map_err(|e| HealerError::driver("reading domains", e))
    }

    /// Insert `{ "domain": domain }` into the target collection.
    pub async fn add_domain(&self, database: &str, target: &str, domain: &str) -> HealerResult<String> {
        self.require_target(database, target).await?;
        let exists = self.domain_exists(database, target, domain).await?;
        let node = plan_domain_add(domain, exists)?;
        self.insert_domain(database, target, node).await
    }

    async fn insert_domain(
        &self,
        database: &str,
        target: &str,
        node: DomainNode,
    ) -> HealerResult<String> {
        let result = self
            .domains(database, target)
            .insert_one(&node)
            .await
            .map_err(|e| HealerError::driver(format!("adding domain '{}'", node.domain), e))?;
        tracing::info!(database, target, domain = %node.domain, "Added domain");
        Ok(id_to_string(&result.inserted_id))
    }

    pub async fn subdomain_exists(
        &self,
        database: &str,
        target: &str,
        domain: &str,
        subdomain: &str,
    ) -> HealerResult<bool> {
        Ok(self
            .find_domain(database, target, domain)
            .await?
            .is_some_and(|node| node.has_subdomain(subdomain)))
    }

    /// Add a subdomain under `domain`, creating the domain document if needed.
    pub async fn add_subdomain(
        &self,
        database: &str,
        target: &str,
        domain: &str,
        subdomain: &str,
    ) -> HealerResult<()> {
        self.require_target(database, target).await?;
        let existing = self.find_domain(database, target, domain).await?;
        match plan_subdomain_add(existing, domain, subdomain)? {
            DomainWrite::Update(node) => self.save_subdomains(database, target, &node).await?,
            DomainWrite::Insert(node) => {
                self.insert_domain(database, target, node).await?;
            }
        }
        tracing::info!(database, target, domain, subdomain, "Added subdomain");
        Ok(())
    }

    pub async fn remove_subdomain(
        &self,
        database: &str,
        target: &str,
        domain: &str,
        subdomain: &str,
    ) -> HealerResult<()> {
        self.modify_domain(database, target, domain, |node| {
            node.remove_subdomain(subdomain).map(|_| ())
        })
        .await?;
        tracing::info!(database, target, domain, subdomain, "Removed subdomain");
        Ok(())
    }

    pub async fn add_directory(
        &self,
        database: &str,
        target: &str,
        domain: &str,
        subdomain: &str,
        path: &str,
    ) -> HealerResult<()> {
        self.modify_domain(database, target, domain, |node| {
            node.insert_directory(subdomain, path)
        })
        .await?;
        tracing::info!(database, target, subdomain, path, "Added directory");
        Ok(())
    }

    pub async fn add_file(
        &self,
        database: &str,
        target: &str,
        domain: &str,
        subdomain: &str,
        directory: &str,
        path: &str,
    ) -> HealerResult<()> {
        self.modify_domain(database, target, domain, |node| {
            node.insert_file(subdomain, directory, path)
        })
        .await?;
        tracing::info!(database, target, subdomain, path, "Added file");
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn add_parameter(
        &self,
        database: &str,
        target: &str,
        domain: &str,
        subdomain: &str,
        directory: &str,
        file: &str,
        parameter: &str,
    ) -> HealerResult<()> {
        self.modify_domain(database, target, domain, |node| {
            node.insert_parameter(subdomain, directory, file, parameter)
        })
        .await?;
        tracing::info!(database, target, file, parameter, "Added parameter");
        Ok(())
    }

    /// Load the domain document, apply `change`, and write back its subdomains.
    async fn modify_domain<F>(
        &self,
        database: &str,
        target: &str,
        domain: &str,
        change: F,
    ) -> HealerResult<DomainNode>
    where
        F: FnOnce(&mut DomainNode) -> HealerResult<()> + Send,
    {
        let existing = self.find_domain(database, target, domain).await?;
        let node = plan_domain_edit(existing, domain, change)?;
        self.save_subdomains(database, target, &node).await?;
        Ok(node)
    }

    async fn save_subdomains(
        &self,
        database: &str,
        target: &str,
        node: &DomainNode,
    ) -> HealerResult<()> {
        let (filter, update) = subdomains_update(node)?;
        self.domains(database, target)
            .update_one(filter, update)
            .await
            .map_err(|e| HealerError::driver(format!("saving domain '{}'", node.domain), e))?;
        Ok(())
    }
}
