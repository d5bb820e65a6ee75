use crate::models::{CreateProduct, PageRequest, Product, ProductId, ProductPage, UpdateProduct};
use crate::service::ProductService;
use crate::store::ProductStore;
use crate::translate::{ErrorTranslator, HttpErrorTranslator, RpcErrorTranslator};

/// [`ProductService`] bound to one transport's [`ErrorTranslator`].
///
/// Entry points call the gateway and get back errors already in their own
/// shape.
pub struct ProductGateway<S: ProductStore, T: ErrorTranslator> {
    service: ProductService<S>,
    translator: T,
}

/// Gateway used by the HTTP handlers
pub type HttpProductGateway<S> = ProductGateway<S, HttpErrorTranslator>;

/// Gateway used by the RPC message handler
pub type RpcProductGateway<S> = ProductGateway<S, RpcErrorTranslator>;

impl<S: ProductStore, T: ErrorTranslator + Clone> Clone for ProductGateway<S, T> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            translator: self.translator.clone(),
        }
    }
}

impl<S: ProductStore, T: ErrorTranslator> ProductGateway<S, T> {
    pub fn new(service: ProductService<S>, translator: T) -> Self {
        Self {
            service,
            translator,
        }
    }

    pub fn service(&self) -> &ProductService<S> {
        &self.service
    }

    pub async fn create(&self, input: CreateProduct) -> Result<Product, T::Error> {
        self.translator
            .translate_result(self.service.create(input).await)
    }

    pub async fn find_all(&self, request: PageRequest) -> Result<ProductPage, T::Error> {
        self.translator
            .translate_result(self.service.find_all(request).await)
    }

    pub async fn find_one(&self, id: ProductId) -> Result<Product, T::Error> {
        self.translator
            .translate_result(self.service.find_one(id).await)
    }

    pub async fn update(&self, id: ProductId, patch: UpdateProduct) -> Result<Product, T::Error> {
        self.translator
            .translate_result(self.service.update(id, patch).await)
    }

    pub async fn remove(&self, id: ProductId) -> Result<Product, T::Error> {
        self.translator
            .translate_result(self.service.remove(id).await)
    }
}

impl<S: ProductStore> HttpProductGateway<S> {
    pub fn http(service: ProductService<S>) -> Self {
        Self::new(service, HttpErrorTranslator)
    }
}

impl<S: ProductStore> RpcProductGateway<S> {
    pub fn rpc(service: ProductService<S>) -> Self {
        Self::new(service, RpcErrorTranslator)
    }
}
